use shared_types::Address;

use crate::errors::VestingError;

/// Moves coins out of the vesting module account as schedules release
/// (mirrors `im-01-inference::EscrowBank` and `im-04-collateral::CollateralBank`).
pub trait VestingBank {
    /// Move `amount` from `granter`'s spendable balance into the vesting pool.
    fn fund_vesting_pool(&mut self, granter: &Address, amount: i64) -> Result<(), VestingError>;

    fn release_to_spendable(&mut self, participant: &Address, amount: i64) -> Result<(), VestingError>;
}

/// In-memory bank for unit tests and the scenario test suite.
#[derive(Default)]
pub struct InMemoryVestingBank {
    pub spendable: std::collections::BTreeMap<Address, i64>,
    pub vesting_pool: i64,
}

impl InMemoryVestingBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, who: &Address) -> i64 {
        *self.spendable.get(who).unwrap_or(&0)
    }
}

impl VestingBank for InMemoryVestingBank {
    fn fund_vesting_pool(&mut self, granter: &Address, amount: i64) -> Result<(), VestingError> {
        let balance = self.spendable.entry(granter.clone()).or_insert(0);
        if *balance < amount {
            return Err(VestingError::Bank(format!("{granter} has {balance}, needs {amount}")));
        }
        *balance -= amount;
        self.vesting_pool += amount;
        Ok(())
    }

    fn release_to_spendable(&mut self, participant: &Address, amount: i64) -> Result<(), VestingError> {
        if self.vesting_pool < amount {
            return Err(VestingError::Bank(format!(
                "vesting pool has {}, needs {amount}",
                self.vesting_pool
            )));
        }
        self.vesting_pool -= amount;
        *self.spendable.entry(participant.clone()).or_insert(0) += amount;
        Ok(())
    }
}
