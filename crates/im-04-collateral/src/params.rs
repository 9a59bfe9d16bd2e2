//! Governance parameters for C5 (spec §4.5, §6).

use serde::{Deserialize, Serialize};
use shared_decimal::Decimal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Epochs an unbonding entry waits before funds return to the participant.
    pub unbonding_period_epochs: u64,
    /// Collateral floor; falling below it on a slash jails the participant.
    pub minimum_collateral: i64,
    /// Epochs a jailed participant must wait before `Unjail` is eligible.
    pub jail_period_epochs: u64,
    /// The only denomination this module accepts (spec §4.5: "validates ... denomination").
    pub denom: shared_types::DenomId,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            unbonding_period_epochs: 21,
            minimum_collateral: 100_000,
            jail_period_epochs: 7,
            denom: shared_types::BASE_DENOM,
        }
    }
}

/// Validates a slash fraction is a finite decimal in `[0, 1]`.
pub fn validate_slash_fraction(fraction: &Decimal) -> bool {
    fraction.cmp_value(&Decimal::zero()) != std::cmp::Ordering::Less
        && fraction.cmp_value(&Decimal::one()) != std::cmp::Ordering::Greater
}
