//! # Inference Payment Engine (C1)
//!
//! A two-message state machine — `StartInference` / `FinishInference`,
//! arriving in either order — that reconciles a single `Inference` record,
//! escrows coins at Start (or defers if Finish arrives first), and settles
//! payment to the executor with any surplus refunded to the requester.

pub mod bank;
pub mod domain;
pub mod errors;
pub mod keeper;
pub mod oracle;
pub mod params;

pub use bank::{EscrowBank, InMemoryEscrowBank};
pub use domain::{FinishInferenceMsg, StartInferenceMsg};
pub use errors::InferenceError;
pub use keeper::InferenceKeeper;
pub use oracle::{FixedPriceOracle, PricingOracle};
pub use params::Params;
