//! Applies a [`crate::domain::Adjustment`] list against a payout bank —
//! the write side of C4, kept separate from the pure redistribution math
//! in `domain.rs`.

use shared_types::Address;

use crate::bank::WorkerPayoutBank;
use crate::domain::{self, Adjustment};
use crate::errors::WorkshareError;

pub struct WorkshareKeeper;

impl WorkshareKeeper {
    pub fn new() -> Self {
        Self
    }

    /// Redistribute `cost` across `existing ∪ new` and apply the resulting
    /// deltas to `bank` (negative deltas debited, positive deltas credited).
    pub fn redistribute(
        &self,
        bank: &mut impl WorkerPayoutBank,
        existing: &[Address],
        new: &[Address],
        cost: i64,
    ) -> Result<Vec<Adjustment>, WorkshareError> {
        if existing.is_empty() && new.is_empty() {
            return Err(WorkshareError::NoWorkers);
        }
        if cost < 0 {
            return Err(WorkshareError::NegativeCost(cost));
        }

        let adjustments = domain::redistribute_work_share(existing, new, cost);
        for adjustment in &adjustments {
            if adjustment.delta < 0 {
                bank.debit_worker(&adjustment.worker, -adjustment.delta)?;
            } else if adjustment.delta > 0 {
                bank.credit_worker(&adjustment.worker, adjustment.delta)?;
            }
        }
        Ok(adjustments)
    }
}

impl Default for WorkshareKeeper {
    fn default() -> Self {
        Self::new()
    }
}
