//! `AddVesting` and the epoch-close release/shift-left hook (spec §4.6).

use chain_store::TypedStore;
use shared_types::{keys, Address, ModuleEvent, VestingSchedule};

use crate::bank::VestingBank;
use crate::domain;
use crate::errors::VestingError;

pub struct VestingKeeper {
    pending_events: Vec<ModuleEvent>,
}

impl VestingKeeper {
    pub fn new() -> Self {
        Self { pending_events: Vec::new() }
    }

    pub fn take_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// `AddVesting(participant, total, n_epochs)` (spec §4.6). `granter` is
    /// debited `total` into the vesting pool before the schedule is recorded.
    pub fn add_vesting(
        &mut self,
        store: &mut impl TypedStore,
        bank: &mut impl VestingBank,
        granter: &Address,
        participant: Address,
        total: i64,
        n_epochs: u32,
    ) -> Result<(), VestingError> {
        if total <= 0 {
            return Err(VestingError::NonPositiveTotal(total));
        }
        if n_epochs == 0 {
            return Err(VestingError::InvalidEpochCount(n_epochs));
        }

        bank.fund_vesting_pool(granter, total)?;

        let key = keys::vesting_key(&participant);
        let mut schedule = store
            .get_json(&key)?
            .unwrap_or_else(|| VestingSchedule { participant: participant.clone(), epoch_amounts: Vec::new() });

        let new_amounts = domain::split_vesting(total, n_epochs);
        if schedule.epoch_amounts.len() < new_amounts.len() {
            schedule.epoch_amounts.resize(new_amounts.len(), 0);
        }
        for (i, amount) in new_amounts.into_iter().enumerate() {
            schedule.epoch_amounts[i] += amount;
        }
        store.put_json(&key, &schedule)?;

        self.pending_events.push(ModuleEvent::VestingGranted { participant, total, epochs: n_epochs });
        Ok(())
    }

    /// Epoch-close hook (spec §4.6): release `epoch_amounts[0]` to every
    /// scheduled participant, shift the remainder left, and delete the
    /// record once the schedule is exhausted.
    pub fn epoch_close_release(
        &mut self,
        store: &mut impl TypedStore,
        bank: &mut impl VestingBank,
    ) -> Result<(), VestingError> {
        let entries = store.prefix_scan_json::<VestingSchedule>(&[keys::prefix::VESTING])?;
        for (key, mut schedule) in entries {
            if schedule.epoch_amounts.is_empty() {
                store.delete(&key)?;
                continue;
            }

            let release = schedule.epoch_amounts.remove(0);
            if release > 0 {
                bank.release_to_spendable(&schedule.participant, release)?;
                self.pending_events.push(ModuleEvent::VestingReleased {
                    participant: schedule.participant.clone(),
                    amount: release,
                });
            }

            if schedule.epoch_amounts.is_empty() {
                store.delete(&key)?;
            } else {
                store.put_json(&key, &schedule)?;
            }
        }
        Ok(())
    }

    pub fn get(&self, store: &impl TypedStore, participant: &str) -> Result<VestingSchedule, VestingError> {
        store
            .get_json(&keys::vesting_key(participant))?
            .ok_or_else(|| VestingError::NotFound(participant.to_string()))
    }
}

impl Default for VestingKeeper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::InMemoryVestingBank;
    use chain_store::InMemoryStore;

    fn fund(bank: &mut InMemoryVestingBank, who: &str, amount: i64) {
        *bank.spendable.entry(who.to_string()).or_insert(0) += amount;
    }

    #[test]
    fn add_vesting_splits_with_remainder_first() {
        let mut store = InMemoryStore::new();
        let mut bank = InMemoryVestingBank::new();
        fund(&mut bank, "treasury", 100);
        let mut keeper = VestingKeeper::new();

        keeper
            .add_vesting(&mut store, &mut bank, &"treasury".to_string(), "alice".into(), 100, 3)
            .unwrap();

        let schedule = keeper.get(&store, "alice").unwrap();
        assert_eq!(schedule.epoch_amounts, vec![34, 33, 33]);
        assert_eq!(schedule.total(), 100);
    }

    #[test]
    fn epoch_close_releases_first_amount_and_shifts_left() {
        let mut store = InMemoryStore::new();
        let mut bank = InMemoryVestingBank::new();
        fund(&mut bank, "treasury", 100);
        let mut keeper = VestingKeeper::new();
        keeper
            .add_vesting(&mut store, &mut bank, &"treasury".to_string(), "alice".into(), 100, 3)
            .unwrap();

        keeper.epoch_close_release(&mut store, &mut bank).unwrap();
        assert_eq!(bank.balance_of(&"alice".to_string()), 34);
        assert_eq!(keeper.get(&store, "alice").unwrap().epoch_amounts, vec![33, 33]);

        keeper.epoch_close_release(&mut store, &mut bank).unwrap();
        keeper.epoch_close_release(&mut store, &mut bank).unwrap();
        assert_eq!(bank.balance_of(&"alice".to_string()), 100);
        assert!(keeper.get(&store, "alice").is_err());
    }

    #[test]
    fn repeated_add_vesting_accumulates_on_existing_schedule() {
        let mut store = InMemoryStore::new();
        let mut bank = InMemoryVestingBank::new();
        fund(&mut bank, "treasury", 200);
        let mut keeper = VestingKeeper::new();

        keeper
            .add_vesting(&mut store, &mut bank, &"treasury".to_string(), "alice".into(), 100, 2)
            .unwrap();
        keeper
            .add_vesting(&mut store, &mut bank, &"treasury".to_string(), "alice".into(), 100, 2)
            .unwrap();

        let schedule = keeper.get(&store, "alice").unwrap();
        assert_eq!(schedule.total(), 200);
    }

    #[test]
    fn zero_epochs_is_rejected() {
        let mut store = InMemoryStore::new();
        let mut bank = InMemoryVestingBank::new();
        fund(&mut bank, "treasury", 100);
        let mut keeper = VestingKeeper::new();
        let err = keeper
            .add_vesting(&mut store, &mut bank, &"treasury".to_string(), "alice".into(), 100, 0)
            .unwrap_err();
        assert!(matches!(err, VestingError::InvalidEpochCount(0)));
    }
}
