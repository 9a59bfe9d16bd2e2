//! # DKG Coordinator (C7)
//!
//! Slot-partitioned dealing/verification phase machine (spec §4.7):
//! `DEALING -> VERIFYING -> {COMPLETED -> SIGNED, FAILED}`, driven by
//! per-block deadline checks, with the group public key derived as the
//! BLS12-381 G2 sum of each majority-approved dealer's first commitment.

pub mod domain;
pub mod errors;
pub mod keeper;
pub mod params;

pub use domain::{compute_valid_dealers, dealing_quorum_met, verifying_quorum_met};
pub use errors::DkgError;
pub use keeper::DkgKeeper;
pub use params::Params;
