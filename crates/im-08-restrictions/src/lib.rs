//! # Transfer Restriction & Emergency Exemption Gate (C10)
//!
//! A bootstrap-period lock on coin transfers, consulted by every transfer
//! path elsewhere in the core, with governance-managed scoped exceptions
//! (spec §4.10). Usage of a given exemption is tracked per spending
//! account so a shared (`*`-scoped) exemption's allowance isn't shared
//! across unrelated accounts.

pub mod domain;
pub mod errors;
pub mod keeper;
pub mod params;

pub use errors::RestrictionError;
pub use keeper::RestrictionsKeeper;
pub use params::Params;
