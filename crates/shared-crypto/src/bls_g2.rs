//! Raw BLS12-381 G2 point arithmetic for DKG commitments.
//!
//! The DKG's dealer commitments and group public key (spec §4.7) are bare
//! G2 points, summed by curve addition — not a signing keypair. `blst`'s
//! `min_sig` scheme happens to place its public keys on G2 (96 bytes
//! compressed), so its `AggregatePublicKey` gives us exactly the "unmarshal,
//! add, re-marshal" operation the spec calls for without hand-rolling FFI
//! point arithmetic.

use blst::min_sig::{AggregatePublicKey, PublicKey as RawG2Point};

use crate::CryptoError;

/// A compressed BLS12-381 G2 point (96 bytes): a dealer's `C_{k,0}`
/// commitment, or the aggregated group public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct G2Point(RawG2Point);

impl G2Point {
    /// Parse from 96-byte compressed form.
    pub fn from_bytes(bytes: &[u8; 96]) -> Result<Self, CryptoError> {
        RawG2Point::from_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Serialize to 96-byte compressed form.
    pub fn to_bytes(&self) -> [u8; 96] {
        self.0.to_bytes()
    }

    /// Sum a non-empty list of G2 points (spec §4.7: group public key is
    /// "the G2 sum of each valid dealer's first commitment").
    pub fn sum(points: &[G2Point]) -> Result<Self, CryptoError> {
        if points.is_empty() {
            return Err(CryptoError::InvalidInput("empty point list".into()));
        }
        let refs: Vec<&RawG2Point> = points.iter().map(|p| &p.0).collect();
        AggregatePublicKey::aggregate(&refs, false)
            .map(|agg| Self(agg.to_public_key()))
            .map_err(|_| CryptoError::AggregationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blst::min_sig::SecretKey;
    use rand::RngCore;

    fn random_point() -> G2Point {
        let mut ikm = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut ikm);
        let sk = SecretKey::key_gen(&ikm, &[]).expect("valid IKM");
        G2Point(sk.sk_to_pk())
    }

    #[test]
    fn sum_of_single_point_is_itself() {
        let p = random_point();
        let summed = G2Point::sum(&[p.clone()]).unwrap();
        assert_eq!(p, summed);
    }

    #[test]
    fn sum_is_order_independent() {
        let a = random_point();
        let b = random_point();
        let c = random_point();

        let sum1 = G2Point::sum(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let sum2 = G2Point::sum(&[c, a, b]).unwrap();
        assert_eq!(sum1, sum2);
    }

    #[test]
    fn sum_of_empty_list_fails() {
        assert!(G2Point::sum(&[]).is_err());
    }

    #[test]
    fn roundtrip_bytes() {
        let p = random_point();
        let bytes = p.to_bytes();
        let restored = G2Point::from_bytes(&bytes).unwrap();
        assert_eq!(p, restored);
    }
}
