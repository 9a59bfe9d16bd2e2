//! Collateral account state and the pure slash/unbond arithmetic (§4.5).

use serde::{Deserialize, Serialize};
use shared_decimal::Decimal;
use shared_types::Address;

/// A participant's staked collateral balance, keyed at `keys::collateral_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateralAccount {
    pub participant: Address,
    pub amount: i64,
    pub jailed: bool,
    /// Set when `jailed` transitions to `true`; `Unjail` is only legal once
    /// the current epoch reaches this value.
    pub jail_eligible_epoch: Option<u64>,
}

impl CollateralAccount {
    pub fn new(participant: Address) -> Self {
        Self { participant, amount: 0, jailed: false, jail_eligible_epoch: None }
    }
}

/// Result of applying a slash to a collateral balance: the new balance, the
/// amount burned, and whether the new balance fell under the jail floor.
pub struct SlashOutcome {
    pub remaining: i64,
    pub burned: i64,
    pub should_jail: bool,
}

/// `collateral * (1 - fraction)`, with the burned remainder, and whether the
/// result falls below `minimum_collateral` (spec §4.5: "`Slash(participant,
/// fraction)`: multiply collateral by `(1 - fraction)` ... if resulting
/// collateral falls below a minimum, mark participant JAILED").
pub fn apply_slash(collateral: i64, fraction: &Decimal, minimum_collateral: i64) -> SlashOutcome {
    let retained_fraction = Decimal::one().checked_sub(fraction);
    let remaining = Decimal::from_i64(collateral).checked_mul(&retained_fraction).floor_to_i64().max(0);
    let burned = collateral - remaining;
    SlashOutcome { remaining, burned, should_jail: remaining < minimum_collateral }
}
