//! Work-share redistribution (§4.4).
//!
//! When late validators join an inference whose cost was already divided
//! among `existing` workers (remainder to the first), this recomputes an
//! equal split across `existing ∪ new` (remainder still to the first
//! existing worker) and emits the signed deltas needed to get there.

use shared_types::Address;

/// A single worker's balance change. `delta` may be negative (an existing
/// worker giving back part of its original share) or positive (a new
/// worker's initial share).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Adjustment {
    pub worker: Address,
    pub delta: i64,
}

/// Redistribute `cost` across `existing ∪ new` so every worker holds an
/// equal share, with the division remainder staying on the first worker
/// (the first of `existing` if non-empty, else the first of `new`).
///
/// Guarantees (spec §4.4, testable property 4): `sum(deltas) == 0` when
/// `existing` is non-empty (a pure transfer among workers); `sum(deltas)
/// == cost` when `existing` is empty (nothing was paid out yet).
pub fn redistribute_work_share(existing: &[Address], new: &[Address], cost: i64) -> Vec<Adjustment> {
    let total = existing.len() + new.len();
    if total == 0 {
        return Vec::new();
    }
    let total_i64 = total as i64;
    let new_share = cost / total_i64;
    let new_rem = cost % total_i64;

    let mut adjustments = Vec::with_capacity(total);

    if existing.is_empty() {
        for (i, worker) in new.iter().enumerate() {
            let target = new_share + if i == 0 { new_rem } else { 0 };
            adjustments.push(Adjustment { worker: worker.clone(), delta: target });
        }
        return adjustments;
    }

    let existing_len = existing.len() as i64;
    let old_share = cost / existing_len;
    let old_rem = cost % existing_len;

    for (i, worker) in existing.iter().enumerate() {
        let current = old_share + if i == 0 { old_rem } else { 0 };
        let target = new_share + if i == 0 { new_rem } else { 0 };
        adjustments.push(Adjustment { worker: worker.clone(), delta: target - current });
    }
    for worker in new {
        adjustments.push(Adjustment { worker: worker.clone(), delta: new_share });
    }

    adjustments
}
