//! # Reputation, Validation Sampling, Throttling & Miss Test (C2 + C3 + C8)
//!
//! Grouped into one crate per the spec's own size-budget grouping (§2:
//! "C2+C3+C8 20%"): a participant's bounded reputation score, the
//! per-request validation-probability curve and deterministic draw, the
//! `tanh`-based invalidation throttle, and the pre-tabulated binomial
//! miss-count test. All probability and curve math is exact decimal
//! arithmetic (`shared_decimal::Decimal`) — no floating point anywhere in
//! a consensus-relevant computation (spec §5).

pub mod errors;
pub mod keeper;
pub mod miss_stat;
pub mod params;
pub mod reputation;
pub mod sampler;
pub mod throttle;

pub use errors::ReputationError;
pub use keeper::ReputationKeeper;
pub use miss_stat::{missed_stat_test, MissStatError};
pub use params::Params;
pub use reputation::calculate_reputation;
pub use sampler::{should_validate, validation_probability};
pub use throttle::calculate_invalidations;
