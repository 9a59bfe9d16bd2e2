//! # Collateral & Unbonding (C5)
//!
//! Deposit/withdraw staking collateral, an epoch-indexed unbonding queue
//! that drains FIFO by completion epoch, and slashing with an automatic
//! jail/unjail cycle (spec §4.5).

pub mod bank;
pub mod domain;
pub mod errors;
pub mod keeper;
pub mod params;

pub use bank::{CollateralBank, InMemoryCollateralBank};
pub use domain::{apply_slash, CollateralAccount, SlashOutcome};
pub use errors::CollateralError;
pub use keeper::CollateralKeeper;
pub use params::Params;
