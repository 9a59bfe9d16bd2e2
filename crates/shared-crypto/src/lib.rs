//! # Shared Crypto - Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `ecdsa` | secp256k1 | Developer/transfer-agent/executor-agent payload signing (C9) |
//! | `bls` | BLS12-381 (min_pk) | DKG dealer commitments and group public key (C7) |
//! | `bech32_addr` | bech32 | Participant address validation (data-model invariant 6) |
//! | `draw` | SHA-256 | Deterministic validation-sampler draw (C2) |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **BLS12-381**: `min_pk` scheme (signatures/commitments on G2), Ethereum-compatible DST

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bech32_addr;
pub mod bls;
pub mod bls_g2;
pub mod draw;
pub mod ecdsa;
pub mod errors;

// Re-exports
pub use bech32_addr::{decode_address, encode_address, is_valid_address};
pub use bls::{BlsKeyPair, BlsPublicKey, BlsSignature};
pub use bls_g2::G2Point;
pub use draw::deterministic_numerator;
pub use ecdsa::{verify_against_any, Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
