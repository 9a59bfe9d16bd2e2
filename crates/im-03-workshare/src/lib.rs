//! # Work-Share Redistribution (C4)
//!
//! Conservative redistribution of an already-paid inference's payout when
//! additional validators join after settlement. Pure redistribution math
//! lives in `domain`; `keeper` applies the resulting deltas against a
//! payout bank.

pub mod bank;
pub mod domain;
pub mod errors;
pub mod keeper;

pub use bank::{InMemoryPayoutBank, WorkerPayoutBank};
pub use domain::{redistribute_work_share, Adjustment};
pub use errors::WorkshareError;
pub use keeper::WorkshareKeeper;
