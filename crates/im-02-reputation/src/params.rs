//! Governance parameters for C2 (reputation, validation sampling) and C3
//! (invalidation throttle). Names follow spec §6's configuration table.

use serde::{Deserialize, Serialize};
use shared_decimal::Decimal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Epochs after which a perfect-attendance participant reaches full
    /// reputation (`ETM`).
    pub epochs_to_max: u64,
    /// Miss fraction above which an epoch is penalised (`MPC`, in `[0,1]`).
    pub miss_percentage_cutoff: Decimal,
    /// Multiplier applied to the running penalty accumulator (`MRP`).
    pub miss_requests_penalty: Decimal,

    /// Validation-probability curve floor/ceiling and traffic cutoffs.
    pub min_validation_average: Decimal,
    pub min_validation_halfway: Decimal,
    pub max_validation_average: Decimal,
    pub full_validation_traffic_cutoff: u64,
    pub min_validation_traffic_cutoff: u64,

    /// Throttling law (`M`, `C`); `InvalidationsSamplePeriod` bounds the
    /// window over which the caller counts `I` before calling
    /// [`crate::throttle::calculate_invalidations`] and is not otherwise
    /// consulted by the formula itself.
    pub invalidations_limit: i64,
    pub invalidations_limit_curve: Decimal,
    pub invalidations_sample_period: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            epochs_to_max: 100,
            miss_percentage_cutoff: Decimal::parse("0.10").expect("valid literal"),
            miss_requests_penalty: Decimal::parse("3.0").expect("valid literal"),

            min_validation_average: Decimal::parse("0.01").expect("valid literal"),
            min_validation_halfway: Decimal::parse("0.1").expect("valid literal"),
            max_validation_average: Decimal::one(),
            full_validation_traffic_cutoff: 10_000,
            min_validation_traffic_cutoff: 100,

            invalidations_limit: 1000,
            invalidations_limit_curve: Decimal::from_i64(500),
            invalidations_sample_period: 10_000,
        }
    }
}
