//! Content-addressed result cache.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  ResultCache (version.rs) - get-or-compute, gating       │
//! │  - key derivation (key.rs): bincode → SHA-256 → 64 bits  │
//! │  - value codec (binary.rs): bincode, decode-fail = miss  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  BinaryStore trait (store.rs)                            │
//! │  - LocalStore (in-memory) / RedisStore (redis-store)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Cache failures are policy-handled where they occur: a failed or
//! undecodable get is a miss, a failed put is dropped. Only startup code
//! treats store errors as fatal.

pub mod binary;
pub mod factory;
pub mod key;
pub mod store;
pub mod version;

#[cfg(feature = "redis-store")]
pub mod redis;

pub use factory::StoreFactory;
pub use key::{request_key, CacheKey, ResultNamespace, VERSION_KEY};
pub use store::{BinaryStore, LocalStore, StoreError, StoreResult};
pub use version::ResultCache;
