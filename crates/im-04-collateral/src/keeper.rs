//! `DepositCollateral` / `WithdrawCollateral` / `Slash` / `Unjail` and the
//! epoch-close unbonding-queue hook (spec §4.5).

use chain_store::TypedStore;
use shared_crypto::bech32_addr;
use shared_decimal::Decimal;
use shared_types::{keys, Address, DenomId, ModuleEvent, UnbondingEntry};

use crate::bank::CollateralBank;
use crate::domain::{self, CollateralAccount};
use crate::errors::CollateralError;
use crate::params::Params;

pub struct CollateralKeeper {
    params: Params,
    pending_events: Vec<ModuleEvent>,
}

impl CollateralKeeper {
    pub fn new(params: Params) -> Self {
        Self { params, pending_events: Vec::new() }
    }

    pub fn take_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn validate_address(address: &str) -> Result<(), CollateralError> {
        if !bech32_addr::is_valid_address(address) {
            return Err(CollateralError::InvalidAddress(address.to_string(), "not a valid bech32 address".into()));
        }
        Ok(())
    }

    fn validate_denom(&self, denom: DenomId) -> Result<(), CollateralError> {
        if denom != self.params.denom {
            return Err(CollateralError::InvalidDenom(format!(
                "expected {}, got {}",
                self.params.denom.0, denom.0
            )));
        }
        Ok(())
    }

    fn get_account(&self, store: &impl TypedStore, participant: &str) -> Result<CollateralAccount, CollateralError> {
        store
            .get_json(&keys::collateral_key(participant))?
            .ok_or_else(|| CollateralError::NoCollateralFound(participant.to_string()))
    }

    /// `DepositCollateral(participant, amount)` (spec §4.5).
    pub fn deposit(
        &mut self,
        store: &mut impl TypedStore,
        bank: &mut impl CollateralBank,
        participant: Address,
        amount: i64,
        denom: DenomId,
    ) -> Result<(), CollateralError> {
        Self::validate_address(&participant)?;
        self.validate_denom(denom)?;
        if amount <= 0 {
            return Err(CollateralError::NonPositiveAmount(amount));
        }

        let key = keys::collateral_key(&participant);
        let mut account = store
            .get_json(&key)?
            .unwrap_or_else(|| CollateralAccount::new(participant.clone()));

        bank.debit_spendable(&participant, amount)?;
        bank.credit_collateral_pool(amount)?;
        account.amount += amount;
        store.put_json(&key, &account)?;

        self.pending_events.push(ModuleEvent::DepositCollateral { participant, amount });
        Ok(())
    }

    /// `WithdrawCollateral(participant, amount)` (spec §4.5).
    pub fn withdraw(
        &mut self,
        store: &mut impl TypedStore,
        bank: &mut impl CollateralBank,
        participant: Address,
        amount: i64,
        current_epoch: u64,
    ) -> Result<(), CollateralError> {
        Self::validate_address(&participant)?;
        if amount <= 0 {
            return Err(CollateralError::NonPositiveAmount(amount));
        }

        let key = keys::collateral_key(&participant);
        let mut account = self.get_account(store, &participant)?;
        if account.amount < amount {
            return Err(CollateralError::InsufficientCollateral {
                participant: participant.clone(),
                have: account.amount,
                need: amount,
            });
        }

        account.amount -= amount;
        bank.debit_collateral_pool(amount)?;
        bank.credit_unbonding_pool(amount)?;
        store.put_json(&key, &account)?;

        let completion_epoch = current_epoch + self.params.unbonding_period_epochs;
        let entry = UnbondingEntry { participant: participant.clone(), completion_epoch, amount };
        store.put_json(&keys::unbonding_key(completion_epoch, &participant), &entry)?;

        self.pending_events.push(ModuleEvent::WithdrawCollateral { participant, amount, completion_epoch });
        Ok(())
    }

    /// Epoch-close hook (spec §4.5): release every unbonding entry whose
    /// `completion_epoch <= current_epoch`, in ascending key order so the
    /// queue drains FIFO-by-completion-epoch (data-model invariant 4).
    pub fn epoch_close_release_unbonding(
        &mut self,
        store: &mut impl TypedStore,
        bank: &mut impl CollateralBank,
        current_epoch: u64,
    ) -> Result<(), CollateralError> {
        let (lo, hi) = keys::unbonding_prefix_upto(current_epoch);
        let due: Vec<(Vec<u8>, UnbondingEntry)> = store.range_scan_json(&lo, &hi)?;

        for (key, entry) in due {
            bank.debit_unbonding_pool(entry.amount)?;
            bank.credit_spendable(&entry.participant, entry.amount)?;
            store.delete(&key)?;

            self.pending_events.push(ModuleEvent::ProcessWithdrawal {
                participant: entry.participant,
                amount: entry.amount,
                completion_epoch: entry.completion_epoch,
            });
        }
        Ok(())
    }

    /// `Slash(participant, fraction)` (spec §4.5).
    pub fn slash(
        &mut self,
        store: &mut impl TypedStore,
        bank: &mut impl CollateralBank,
        participant: &str,
        fraction: Decimal,
        current_epoch: u64,
    ) -> Result<(), CollateralError> {
        if !crate::params::validate_slash_fraction(&fraction) {
            return Err(CollateralError::InvalidSlashFraction(fraction.to_string()));
        }

        let key = keys::collateral_key(participant);
        let mut account = self.get_account(store, participant)?;
        let outcome = domain::apply_slash(account.amount, &fraction, self.params.minimum_collateral);

        account.amount = outcome.remaining;
        bank.debit_collateral_pool(outcome.burned)?;
        bank.burn(outcome.burned)?;

        if outcome.should_jail && !account.jailed {
            account.jailed = true;
            account.jail_eligible_epoch = Some(current_epoch + self.params.jail_period_epochs);
            self.pending_events.push(ModuleEvent::ParticipantJailed { participant: participant.to_string() });
        }
        store.put_json(&key, &account)?;

        self.pending_events.push(ModuleEvent::SlashCollateral {
            participant: participant.to_string(),
            slash_fraction: fraction.to_string(),
            amount_burned: outcome.burned,
        });
        Ok(())
    }

    /// `Unjail(participant)` (spec §4.5): only once the jail period has
    /// elapsed and collateral is back above the minimum.
    pub fn unjail(
        &mut self,
        store: &mut impl TypedStore,
        participant: &str,
        current_epoch: u64,
    ) -> Result<(), CollateralError> {
        let key = keys::collateral_key(participant);
        let mut account = self.get_account(store, participant)?;

        if !account.jailed {
            return Err(CollateralError::NotJailed(participant.to_string()));
        }
        let eligible_epoch = account.jail_eligible_epoch.unwrap_or(u64::MAX);
        if current_epoch < eligible_epoch {
            return Err(CollateralError::JailPeriodNotElapsed {
                participant: participant.to_string(),
                eligible_epoch,
                current_epoch,
            });
        }
        if account.amount < self.params.minimum_collateral {
            return Err(CollateralError::InsufficientCollateral {
                participant: participant.to_string(),
                have: account.amount,
                need: self.params.minimum_collateral,
            });
        }

        account.jailed = false;
        account.jail_eligible_epoch = None;
        store.put_json(&key, &account)?;

        self.pending_events.push(ModuleEvent::ParticipantUnjailed { participant: participant.to_string() });
        Ok(())
    }

    pub fn get(&self, store: &impl TypedStore, participant: &str) -> Result<CollateralAccount, CollateralError> {
        self.get_account(store, participant)
    }
}
