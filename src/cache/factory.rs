//! Store factory for dependency injection.
//!
//! Creates the configured byte-store backend: the in-memory store by
//! default, Redis when a cache URL is configured and the `redis-store`
//! feature is compiled in.

use std::sync::Arc;

use super::store::{BinaryStore, LocalStore, StoreResult};

#[cfg(not(feature = "redis-store"))]
use super::store::StoreError;

#[cfg(feature = "redis-store")]
use super::redis::RedisStore;

/// Factory for creating store instances.
pub struct StoreFactory;

impl StoreFactory {
    /// Create the in-memory store.
    pub fn create_local() -> Arc<dyn BinaryStore> {
        Arc::new(LocalStore::new())
    }

    /// Create a Redis-backed store.
    #[cfg(feature = "redis-store")]
    pub async fn create_redis(url: &str) -> StoreResult<Arc<dyn BinaryStore>> {
        let store = RedisStore::connect(url).await?;
        Ok(Arc::new(store))
    }

    /// Create the store described by an optional cache URL: `None` selects
    /// the in-memory store, `Some(url)` selects Redis.
    ///
    /// # Errors
    /// Returns a configuration error when a URL is given but the
    /// `redis-store` feature is not compiled in, or when the connection
    /// cannot be established.
    pub async fn from_cache_url(url: Option<&str>) -> StoreResult<Arc<dyn BinaryStore>> {
        match url {
            None => Ok(Self::create_local()),
            #[cfg(feature = "redis-store")]
            Some(url) => Self::create_redis(url).await,
            #[cfg(not(feature = "redis-store"))]
            Some(_) => Err(StoreError::Configuration(
                "cache URL configured but the redis-store feature is not enabled".to_string(),
            )),
        }
    }
}
