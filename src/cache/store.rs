//! Byte-addressable store abstraction and the in-memory implementation.
//!
//! The core consumes only `get`/`put` plus a wholesale flush for version
//! changes. No expiry is ever set; the backend may evict at will.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a store backend. Callers treat get failures as misses
/// and ignore put failures; only startup code propagates them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend unreachable or connection lost.
    #[error("Store connection error: {0}")]
    Connection(String),

    /// Backend rejected or failed the operation.
    #[error("Store backend error: {0}")]
    Backend(String),

    /// Store misconfigured (bad URL, missing feature).
    #[error("Store configuration error: {0}")]
    Configuration(String),
}

/// Minimal byte-addressable key-value surface consumed by the cache.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; writes are idempotent because
/// values are pure functions of keys.
#[async_trait]
pub trait BinaryStore: Send + Sync {
    /// Fetch the value stored at `key`, if any.
    async fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` at `key`, replacing any previous value. No expiry.
    async fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Remove every entry. Used when the upstream data version changes.
    async fn flush_all(&self) -> StoreResult<()>;

    /// Probe backend liveness.
    async fn health_check(&self) -> StoreResult<bool>;
}

/// In-memory store used for local development and tests.
#[derive(Default)]
pub struct LocalStore {
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl BinaryStore for LocalStore {
    async fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.entries.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    async fn flush_all(&self) -> StoreResult<()> {
        self.entries.write().clear();
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(true)
    }
}
