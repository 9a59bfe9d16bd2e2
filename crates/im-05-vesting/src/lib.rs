//! # Stream-Vesting Ledger (C6)
//!
//! Per-participant ordered release schedules: `AddVesting` splits a grant
//! evenly across epochs (remainder to the soonest), and the epoch-close
//! hook releases `epoch_amounts[0]` and shifts the rest left (spec §4.6).

pub mod bank;
pub mod domain;
pub mod errors;
pub mod keeper;

pub use bank::{InMemoryVestingBank, VestingBank};
pub use domain::split_vesting;
pub use errors::VestingError;
pub use keeper::VestingKeeper;
