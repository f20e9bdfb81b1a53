//! Content-addressed cache keys.
//!
//! Requests are serialized with `bincode` (fixed-layout binary, field order
//! is struct declaration order), hashed with SHA-256, and truncated to 64
//! bits. `serde_json` is never used for hashing. Keys are
//! `"<namespace>:<16-lowercase-hex>"` encoded as UTF-8.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Key reserved for the recorded upstream data version.
pub const VERSION_KEY: &[u8] = b"version";

/// Namespace per result shape, preventing cross-decoding between kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResultNamespace {
    SpectroscopyGraph,
    SpectroscopyTime,
    ImagingTime,
}

impl ResultNamespace {
    pub fn prefix(&self) -> &'static str {
        match self {
            ResultNamespace::SpectroscopyGraph => "spec-graph",
            ResultNamespace::SpectroscopyTime => "spec-time",
            ResultNamespace::ImagingTime => "img-time",
        }
    }
}

/// A derived cache key, ready to hand to the byte store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derive the cache key for a normalised request.
///
/// The hash is a pure function of the request value: logically equal
/// requests produce equal keys across processes of the same build.
pub fn request_key<T: Serialize>(namespace: ResultNamespace, request: &T) -> CacheKey {
    // Requests are plain enums, newtypes, Vecs, and Strings; bincode
    // serialization cannot fail for these types.
    let bytes = bincode::serialize(request).expect("bincode serialization of a request is infallible");
    let digest = Sha256::digest(&bytes);
    let mut hash = [0u8; 8];
    hash.copy_from_slice(&digest[..8]);
    CacheKey(format!("{}:{}", namespace.prefix(), hex::encode(hash)))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde::Serialize;

    #[derive(Debug, Clone, Serialize)]
    struct ArbRequest {
        name: String,
        value: i64,
        flag: bool,
        samples: Vec<i64>,
    }

    fn arb_request() -> impl Strategy<Value = ArbRequest> {
        (".*", any::<i64>(), any::<bool>(), prop::collection::vec(any::<i64>(), 0..8)).prop_map(
            |(name, value, flag, samples)| ArbRequest { name, value, flag, samples },
        )
    }

    proptest! {
        /// Equal requests always derive equal keys.
        #[test]
        fn key_is_a_pure_function(request in arb_request()) {
            let twin = request.clone();
            prop_assert_eq!(
                request_key(ResultNamespace::SpectroscopyGraph, &request),
                request_key(ResultNamespace::SpectroscopyGraph, &twin)
            );
        }

        /// Namespaces never collide for the same request.
        #[test]
        fn namespaces_stay_disjoint(request in arb_request()) {
            let graph = request_key(ResultNamespace::SpectroscopyGraph, &request);
            let time = request_key(ResultNamespace::SpectroscopyTime, &request);
            prop_assert_ne!(graph, time);
        }
    }
}
