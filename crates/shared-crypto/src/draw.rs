//! Deterministic pseudo-random draw used by the validation sampler.
//!
//! `r = SHA-256(seed || ":" || id)[0..8]` read as a big-endian `u64`,
//! conceptually `r/2^64 ∈ [0, 1)`, but never actually divided into a
//! float — callers compare the raw numerator against a decimal-derived
//! threshold instead (no floating-point is permitted in the core).

use sha2::{Digest, Sha256};

/// Raw `u64` numerator of the draw, for callers doing exact integer or
/// decimal comparisons instead of floating-point ones. This is the only
/// randomness source permitted in the core (spec §5).
pub fn deterministic_numerator(seed: &str, id: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(b":");
    hasher.update(id.as_bytes());
    let digest = hasher.finalize();

    let mut buf = [0u8; 8];
    buf.copy_from_slice(&digest[0..8]);
    u64::from_be_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_calls() {
        let a = deterministic_numerator("epoch-7", "inf1");
        let b = deterministic_numerator("epoch-7", "inf1");
        assert_eq!(a, b);
    }

    #[test]
    fn differs_by_id() {
        let a = deterministic_numerator("epoch-7", "inf1");
        let b = deterministic_numerator("epoch-7", "inf2");
        assert_ne!(a, b);
    }
}
