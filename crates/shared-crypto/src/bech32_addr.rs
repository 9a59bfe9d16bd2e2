//! Bech32 address encode/decode.
//!
//! Every persisted record that references a participant address must be
//! bech32-decodable (data-model invariant 6). This module is the single
//! place that rule is enforced.

use bech32::{FromBase32, ToBase32, Variant};

use crate::CryptoError;

/// Decode a bech32 address string, returning its human-readable prefix and
/// raw payload bytes.
pub fn decode_address(address: &str) -> Result<(String, Vec<u8>), CryptoError> {
    let (hrp, data, variant) =
        bech32::decode(address).map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
    if variant != Variant::Bech32 {
        return Err(CryptoError::InvalidInput(
            "address must use bech32 (not bech32m) encoding".into(),
        ));
    }
    let bytes = Vec::<u8>::from_base32(&data).map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
    Ok((hrp, bytes))
}

/// Encode raw bytes as a bech32 address under the given human-readable prefix.
pub fn encode_address(hrp: &str, payload: &[u8]) -> Result<String, CryptoError> {
    bech32::encode(hrp, payload.to_base32(), Variant::Bech32)
        .map_err(|e| CryptoError::InvalidInput(e.to_string()))
}

/// Validate that a string is a well-formed bech32 address, without caring
/// about its prefix or payload.
pub fn is_valid_address(address: &str) -> bool {
    decode_address(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let encoded = encode_address("infer", &[1, 2, 3, 4, 5]).unwrap();
        let (hrp, payload) = decode_address(&encoded).unwrap();
        assert_eq!(hrp, "infer");
        assert_eq!(payload, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn rejects_malformed() {
        assert!(!is_valid_address("not-a-bech32-address"));
        assert!(!is_valid_address(""));
    }
}
