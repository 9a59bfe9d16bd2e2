use shared_types::Address;

use crate::errors::InferenceError;

/// The module-account bank the core assumes as a host collaborator (spec
/// §1: "a module-account bank with deterministic coin arithmetic"). The
/// keeper never holds coins itself; it only reports the movements this
/// trait's implementor must make atomically alongside the state write.
pub trait EscrowBank {
    /// Move `amount` from `payer`'s spendable balance into the escrow
    /// sub-account.
    fn debit_to_escrow(&mut self, payer: &Address, amount: i64) -> Result<(), InferenceError>;

    /// Pay `amount` out of the escrow sub-account to `payee` (the executor).
    fn pay_from_escrow(&mut self, payee: &Address, amount: i64) -> Result<(), InferenceError>;

    /// Refund `amount` out of the escrow sub-account back to `payee` (the
    /// requester).
    fn refund_from_escrow(&mut self, payee: &Address, amount: i64) -> Result<(), InferenceError>;
}

/// In-memory bank for unit tests and the scenario test suite. Tracks
/// spendable balances and the escrow sub-account balance so conservation
/// (data-model invariant 1) can be asserted directly.
#[derive(Default)]
pub struct InMemoryEscrowBank {
    pub balances: std::collections::BTreeMap<Address, i64>,
    pub escrow_balance: i64,
}

impl InMemoryEscrowBank {
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

impl EscrowBank for InMemoryEscrowBank {
    fn debit_to_escrow(&mut self, payer: &Address, amount: i64) -> Result<(), InferenceError> {
        let balance = self.balances.entry(payer.clone()).or_insert(0);
        if *balance < amount {
            return Err(InferenceError::Bank(format!(
                "{payer} has {balance}, needs {amount} for escrow"
            )));
        }
        *balance -= amount;
        self.escrow_balance += amount;
        Ok(())
    }

    fn pay_from_escrow(&mut self, payee: &Address, amount: i64) -> Result<(), InferenceError> {
        if self.escrow_balance < amount {
            return Err(InferenceError::Bank(format!(
                "escrow has {}, needs {amount}",
                self.escrow_balance
            )));
        }
        self.escrow_balance -= amount;
        self.credit(payee, amount);
        Ok(())
    }

    fn refund_from_escrow(&mut self, payee: &Address, amount: i64) -> Result<(), InferenceError> {
        self.pay_from_escrow(payee, amount)
    }
}
