//! Canonical serialization for deterministic hashing.
//!
//! Fingerprints of graph state and configuration are xxh64 hashes of
//! canonical JSON bytes.
//!
//! ## Determinism Guarantees
//!
//! - Struct fields serialize in declaration order
//! - Maps in hashed data are `BTreeMap`, never `HashMap`
//! - Costs are hashed by bit pattern via [`cost_bits`], so infinities and
//!   signed zeros survive (JSON has no representation for them)

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
///
/// # Panics
///
/// Panics if the value's `Serialize` impl fails. The kernel only hashes
/// plain data (integers, strings, vectors, ordered maps), which cannot fail.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

/// Stable integer form of a cost for hashing.
///
/// `-0.0` is folded into `0.0`; every other value keeps its bit pattern.
pub fn cost_bits(cost: f64) -> u64 {
    if cost == 0.0 {
        0.0f64.to_bits()
    } else {
        cost.to_bits()
    }
}
