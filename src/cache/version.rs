//! Result cache: get-or-compute with version gating.
//!
//! Every cached entry was produced under the currently recorded upstream
//! data version; [`ResultCache::align_data_version`] maintains that
//! invariant by flushing the store wholesale when the version changes.
//!
//! The cache provides no concurrency control. Two simultaneous misses for
//! the same key both compute and both put; the computation is pure, so the
//! duplicate write is harmless.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::DataVersion;

use super::binary;
use super::key::{CacheKey, VERSION_KEY};
use super::store::{BinaryStore, StoreResult};

/// Content-addressed result cache over a byte store.
#[derive(Clone)]
pub struct ResultCache {
    store: Arc<dyn BinaryStore>,
}

impl ResultCache {
    pub fn new(store: Arc<dyn BinaryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn BinaryStore> {
        &self.store
    }

    /// Look up `key`; on a miss run `compute`, store the encoded result,
    /// and return it.
    ///
    /// Store failures never fail the request: a failed get is a miss and a
    /// failed put is ignored, both logged at `warn`. An entry that does not
    /// decode (schema drift across builds) is also a miss.
    pub async fn get_or_compute<T, E, F, Fut>(&self, key: &CacheKey, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.store.get(key.as_bytes()).await {
            Ok(Some(bytes)) => {
                if let Some(value) = binary::decode::<T>(&bytes) {
                    debug!(key = %key, "cache hit");
                    return Ok(value);
                }
                debug!(key = %key, "cached entry did not decode, recomputing");
            }
            Ok(None) => {}
            Err(e) => {
                warn!(key = %key, error = %e, "cache get failed, treating as miss");
            }
        }

        let value = compute().await?;

        if let Err(e) = self.store.put(key.as_bytes(), &binary::encode(&value)).await {
            warn!(key = %key, error = %e, "cache put failed, result not stored");
        }
        Ok(value)
    }

    /// Compare `current` against the recorded upstream data version. On a
    /// difference, flush every entry and record the new version. Returns
    /// whether a flush happened.
    pub async fn align_data_version(&self, current: &DataVersion) -> StoreResult<bool> {
        let recorded = self
            .store
            .get(VERSION_KEY)
            .await?
            .and_then(|bytes| String::from_utf8(bytes).ok());

        if recorded.as_deref() == Some(current.as_str()) {
            return Ok(false);
        }

        warn!(
            recorded = recorded.as_deref().unwrap_or("<none>"),
            current = current.as_str(),
            "upstream data version changed, flushing result cache"
        );
        self.store.flush_all().await?;
        self.store.put(VERSION_KEY, current.as_str().as_bytes()).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::key::{request_key, ResultNamespace};
    use crate::cache::store::LocalStore;

    fn cache() -> ResultCache {
        ResultCache::new(Arc::new(LocalStore::new()))
    }

    #[tokio::test]
    async fn test_get_or_compute_runs_supplier_once() {
        let cache = cache();
        let key = request_key(ResultNamespace::SpectroscopyTime, &"probe");

        let first: Result<u64, ()> = cache.get_or_compute(&key, || async { Ok(41 + 1) }).await;
        assert_eq!(first.unwrap(), 42);

        // Second lookup must be served from the store: the supplier panics
        // if invoked again.
        let second: Result<u64, ()> = cache
            .get_or_compute(&key, || async { panic!("supplier must not run on a hit") })
            .await;
        assert_eq!(second.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_supplier_error_is_propagated_and_not_cached() {
        let cache = cache();
        let key = request_key(ResultNamespace::SpectroscopyTime, &"failing");

        let failed: Result<u64, String> =
            cache.get_or_compute(&key, || async { Err("boom".to_string()) }).await;
        assert_eq!(failed.unwrap_err(), "boom");

        // The failure was not stored; the next call computes again.
        let ok: Result<u64, String> = cache.get_or_compute(&key, || async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_align_data_version_records_and_flushes() {
        let cache = cache();
        let key = request_key(ResultNamespace::ImagingTime, &"entry");
        let v1 = DataVersion::new("2024A.1");
        let v2 = DataVersion::new("2024B.1");

        // First alignment records the version (nothing to flush yet).
        assert!(cache.align_data_version(&v1).await.unwrap());
        let _: Result<u64, ()> = cache.get_or_compute(&key, || async { Ok(5) }).await;

        // Same version: no flush, entry survives.
        assert!(!cache.align_data_version(&v1).await.unwrap());
        let hit: Result<u64, ()> = cache
            .get_or_compute(&key, || async { panic!("entry must still be cached") })
            .await;
        assert_eq!(hit.unwrap(), 5);

        // New version: flush, every key misses.
        assert!(cache.align_data_version(&v2).await.unwrap());
        let recomputed: Result<u64, ()> = cache.get_or_compute(&key, || async { Ok(9) }).await;
        assert_eq!(recomputed.unwrap(), 9);
    }
}
