use shared_types::Address;

use crate::errors::WorkshareError;

/// The module-account bank the core assumes as a host collaborator: moves
/// coins between workers that already hold a share of a settled inference's
/// payout. The keeper never holds coins itself (mirrors `im-01-inference`'s
/// `EscrowBank` seam).
pub trait WorkerPayoutBank {
    /// Claw back `amount` from `worker`'s already-paid balance.
    fn debit_worker(&mut self, worker: &Address, amount: i64) -> Result<(), WorkshareError>;

    /// Pay `amount` to `worker` out of the claw-back pool.
    fn credit_worker(&mut self, worker: &Address, amount: i64) -> Result<(), WorkshareError>;
}

/// In-memory bank for unit tests and the scenario test suite.
#[derive(Default)]
pub struct InMemoryPayoutBank {
    pub balances: std::collections::BTreeMap<Address, i64>,
}

impl InMemoryPayoutBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, who: &Address, amount: i64) {
        *self.balances.entry(who.clone()).or_insert(0) += amount;
    }

    pub fn balance_of(&self, who: &Address) -> i64 {
        *self.balances.get(who).unwrap_or(&0)
    }
}

impl WorkerPayoutBank for InMemoryPayoutBank {
    fn debit_worker(&mut self, worker: &Address, amount: i64) -> Result<(), WorkshareError> {
        let balance = self.balances.entry(worker.clone()).or_insert(0);
        if *balance < amount {
            return Err(WorkshareError::Bank(format!(
                "{worker} has {balance}, needs {amount} clawed back"
            )));
        }
        *balance -= amount;
        Ok(())
    }

    fn credit_worker(&mut self, worker: &Address, amount: i64) -> Result<(), WorkshareError> {
        self.credit(worker, amount);
        Ok(())
    }
}
