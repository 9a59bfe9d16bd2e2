use shared_types::Address;

use crate::errors::CollateralError;

/// The module-account bank the core assumes as a host collaborator, with
/// the three sub-accounts C5 moves coins through (spec §4.5).
pub trait CollateralBank {
    fn debit_spendable(&mut self, participant: &Address, amount: i64) -> Result<(), CollateralError>;
    fn credit_spendable(&mut self, participant: &Address, amount: i64) -> Result<(), CollateralError>;

    fn credit_collateral_pool(&mut self, amount: i64) -> Result<(), CollateralError>;
    fn debit_collateral_pool(&mut self, amount: i64) -> Result<(), CollateralError>;

    fn credit_unbonding_pool(&mut self, amount: i64) -> Result<(), CollateralError>;
    fn debit_unbonding_pool(&mut self, amount: i64) -> Result<(), CollateralError>;

    fn burn(&mut self, amount: i64) -> Result<(), CollateralError>;
}

/// In-memory bank for unit tests and the scenario test suite.
#[derive(Default)]
pub struct InMemoryCollateralBank {
    pub spendable: std::collections::BTreeMap<Address, i64>,
    pub collateral_pool: i64,
    pub unbonding_pool: i64,
    pub burned: i64,
}

impl InMemoryCollateralBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, who: &Address, amount: i64) {
        *self.spendable.entry(who.clone()).or_insert(0) += amount;
    }

    pub fn balance_of(&self, who: &Address) -> i64 {
        *self.spendable.get(who).unwrap_or(&0)
    }
}

impl CollateralBank for InMemoryCollateralBank {
    fn debit_spendable(&mut self, participant: &Address, amount: i64) -> Result<(), CollateralError> {
        let balance = self.spendable.entry(participant.clone()).or_insert(0);
        if *balance < amount {
            return Err(CollateralError::Bank(format!(
                "{participant} has {balance}, needs {amount}"
            )));
        }
        *balance -= amount;
        Ok(())
    }

    fn credit_spendable(&mut self, participant: &Address, amount: i64) -> Result<(), CollateralError> {
        self.credit(participant, amount);
        Ok(())
    }

    fn credit_collateral_pool(&mut self, amount: i64) -> Result<(), CollateralError> {
        self.collateral_pool += amount;
        Ok(())
    }

    fn debit_collateral_pool(&mut self, amount: i64) -> Result<(), CollateralError> {
        if self.collateral_pool < amount {
            return Err(CollateralError::Bank(format!(
                "collateral pool has {}, needs {amount}",
                self.collateral_pool
            )));
        }
        self.collateral_pool -= amount;
        Ok(())
    }

    fn credit_unbonding_pool(&mut self, amount: i64) -> Result<(), CollateralError> {
        self.unbonding_pool += amount;
        Ok(())
    }

    fn debit_unbonding_pool(&mut self, amount: i64) -> Result<(), CollateralError> {
        if self.unbonding_pool < amount {
            return Err(CollateralError::Bank(format!(
                "unbonding pool has {}, needs {amount}",
                self.unbonding_pool
            )));
        }
        self.unbonding_pool -= amount;
        Ok(())
    }

    fn burn(&mut self, amount: i64) -> Result<(), CollateralError> {
        self.burned += amount;
        Ok(())
    }
}
