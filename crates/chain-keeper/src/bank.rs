//! The "module-account bank" every module keeper assumes as a host
//! collaborator (spec §1, §4.1, §4.5, §4.6), unifying `im-01-inference`'s
//! `EscrowBank`, `im-03-workshare`'s `WorkerPayoutBank`, `im-04-collateral`'s
//! `CollateralBank` and `im-05-vesting`'s `VestingBank` over one set of
//! spendable balances plus the module's named sub-pools (escrow,
//! collateral, unbonding, vesting). A real deployment backs this with the
//! host chain's native bank module; this in-memory ledger is the adapter
//! used by `chain-keeper`'s own tests and by any embedder that hasn't
//! wired up a real one yet (mirrors each module crate's own
//! `InMemory*Bank`, just shared across all of them).

use std::collections::BTreeMap;

use im_01_inference::bank::EscrowBank;
use im_03_workshare::bank::WorkerPayoutBank;
use im_04_collateral::bank::CollateralBank;
use im_05_vesting::bank::VestingBank;
use im_01_inference::InferenceError;
use im_03_workshare::WorkshareError;
use im_04_collateral::CollateralError;
use im_05_vesting::VestingError;
use shared_types::Address;

#[derive(Debug, Default)]
pub struct LedgerBank {
    pub spendable: BTreeMap<Address, i64>,
    pub escrow_pool: i64,
    pub collateral_pool: i64,
    pub unbonding_pool: i64,
    pub vesting_pool: i64,
    pub burned: i64,
}

impl LedgerBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, who: &Address, amount: i64) {
        *self.spendable.entry(who.clone()).or_insert(0) += amount;
    }

    pub fn balance_of(&self, who: &Address) -> i64 {
        *self.spendable.get(who).unwrap_or(&0)
    }

    fn debit_spendable(&mut self, who: &Address, amount: i64) -> Result<(), String> {
        let balance = self.spendable.entry(who.clone()).or_insert(0);
        if *balance < amount {
            return Err(format!("{who} has {balance}, needs {amount}"));
        }
        *balance -= amount;
        Ok(())
    }

    /// Total coins the bank is holding across every pool plus every
    /// spendable balance — used by the conservation check in
    /// [`crate::keeper::Keeper`] (data-model invariant 1 and 3).
    pub fn total_supply(&self) -> i64 {
        self.spendable.values().sum::<i64>()
            + self.escrow_pool
            + self.collateral_pool
            + self.unbonding_pool
            + self.vesting_pool
    }
}

impl EscrowBank for LedgerBank {
    fn debit_to_escrow(&mut self, payer: &Address, amount: i64) -> Result<(), InferenceError> {
        self.debit_spendable(payer, amount).map_err(InferenceError::Bank)?;
        self.escrow_pool += amount;
        Ok(())
    }

    fn pay_from_escrow(&mut self, payee: &Address, amount: i64) -> Result<(), InferenceError> {
        if self.escrow_pool < amount {
            return Err(InferenceError::Bank(format!("escrow has {}, needs {amount}", self.escrow_pool)));
        }
        self.escrow_pool -= amount;
        self.credit(payee, amount);
        Ok(())
    }

    fn refund_from_escrow(&mut self, payee: &Address, amount: i64) -> Result<(), InferenceError> {
        self.pay_from_escrow(payee, amount)
    }
}

impl WorkerPayoutBank for LedgerBank {
    fn debit_worker(&mut self, worker: &Address, amount: i64) -> Result<(), WorkshareError> {
        self.debit_spendable(worker, amount).map_err(WorkshareError::Bank)
    }

    fn credit_worker(&mut self, worker: &Address, amount: i64) -> Result<(), WorkshareError> {
        self.credit(worker, amount);
        Ok(())
    }
}

impl CollateralBank for LedgerBank {
    fn debit_spendable(&mut self, participant: &Address, amount: i64) -> Result<(), CollateralError> {
        LedgerBank::debit_spendable(self, participant, amount).map_err(CollateralError::Bank)
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
            return Err(CollateralError::Bank(format!("collateral pool has {}, needs {amount}", self.collateral_pool)));
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
            return Err(CollateralError::Bank(format!("unbonding pool has {}, needs {amount}", self.unbonding_pool)));
        }
        self.unbonding_pool -= amount;
        Ok(())
    }

    fn burn(&mut self, amount: i64) -> Result<(), CollateralError> {
        self.burned += amount;
        Ok(())
    }
}

impl VestingBank for LedgerBank {
    fn fund_vesting_pool(&mut self, granter: &Address, amount: i64) -> Result<(), VestingError> {
        self.debit_spendable(granter, amount).map_err(VestingError::Bank)?;
        self.vesting_pool += amount;
        Ok(())
    }

    fn release_to_spendable(&mut self, participant: &Address, amount: i64) -> Result<(), VestingError> {
        if self.vesting_pool < amount {
            return Err(VestingError::Bank(format!("vesting pool has {}, needs {amount}", self.vesting_pool)));
        }
        self.vesting_pool -= amount;
        self.credit(participant, amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_supply_is_unchanged_by_an_escrow_round_trip() {
        let mut bank = LedgerBank::new();
        bank.credit(&"alice".to_string(), 1_000);
        let before = bank.total_supply();

        EscrowBank::debit_to_escrow(&mut bank, &"alice".to_string(), 400).unwrap();
        EscrowBank::pay_from_escrow(&mut bank, &"bob".to_string(), 300).unwrap();
        EscrowBank::refund_from_escrow(&mut bank, &"alice".to_string(), 100).unwrap();

        assert_eq!(bank.total_supply(), before);
        assert_eq!(bank.balance_of(&"alice".to_string()), 700);
        assert_eq!(bank.balance_of(&"bob".to_string()), 300);
    }

    #[test]
    fn collateral_deposit_and_withdraw_conserve_total_supply() {
        let mut bank = LedgerBank::new();
        bank.credit(&"alice".to_string(), 1_000);
        let before = bank.total_supply();

        CollateralBank::debit_spendable(&mut bank, &"alice".to_string(), 500).unwrap();
        bank.credit_collateral_pool(500).unwrap();
        bank.debit_collateral_pool(500).unwrap();
        bank.credit_unbonding_pool(500).unwrap();
        bank.debit_unbonding_pool(500).unwrap();
        CollateralBank::credit_spendable(&mut bank, &"alice".to_string(), 500).unwrap();

        assert_eq!(bank.total_supply(), before);
    }

    #[test]
    fn slashing_burns_out_of_total_supply() {
        let mut bank = LedgerBank::new();
        bank.credit(&"alice".to_string(), 1_000);
        CollateralBank::debit_spendable(&mut bank, &"alice".to_string(), 1_000).unwrap();
        bank.credit_collateral_pool(1_000).unwrap();
        let before = bank.total_supply();

        bank.debit_collateral_pool(300).unwrap();
        bank.burn(300).unwrap();

        assert_eq!(bank.total_supply(), before - 300);
        assert_eq!(bank.burned, 300);
    }
}
