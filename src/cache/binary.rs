//! Compact binary codec for cached values.
//!
//! Values are stored as `bincode`: a representative graph response measures
//! around 260 KiB in this form against roughly 1.4 MiB as plain JSON. The
//! encoding is deterministic (same value, same bytes) and closed under
//! schema version: a decoder from a different build is not required to
//! understand older entries, so any decode failure is reported as `None`
//! and treated by callers as a cache miss.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encode a value for storage.
pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    // Cached values are plain structs of primitives, Vecs, and Strings;
    // bincode serialization cannot fail for these types.
    bincode::serialize(value).expect("bincode serialization of a cached value is infallible")
}

/// Decode stored bytes. `None` means the entry is unreadable (stale schema,
/// truncated write) and must be recomputed.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    bincode::deserialize(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExposurePlan, SignalToNoise, TimeSpan};

    #[test]
    fn test_round_trip() {
        let plan = ExposurePlan {
            exposure_time: TimeSpan::from_whole_seconds(300).unwrap(),
            exposures: 4,
            total_sn: SignalToNoise::new(20.0).unwrap(),
            single_sn: SignalToNoise::new(10.0).unwrap(),
        };
        let bytes = encode(&plan);
        let decoded: ExposurePlan = decode(&bytes).unwrap();
        assert_eq!(plan, decoded);
    }

    #[test]
    fn test_determinism() {
        let plan = ExposurePlan {
            exposure_time: TimeSpan::from_whole_seconds(60).unwrap(),
            exposures: 10,
            total_sn: SignalToNoise::new(31.6).unwrap(),
            single_sn: SignalToNoise::new(10.0).unwrap(),
        };
        assert_eq!(encode(&plan), encode(&plan));
    }

    #[test]
    fn test_garbage_decodes_to_none() {
        let garbage = [0xffu8; 7];
        assert!(decode::<ExposurePlan>(&garbage).is_none());
    }

    #[test]
    fn test_cross_type_decode_fails() {
        // A value encoded under one shape must not decode under another.
        let bytes = encode(&vec![1u8, 2, 3]);
        assert!(decode::<ExposurePlan>(&bytes).is_none());
    }
}
