//! The transfer-restriction gate and its emergency-exemption registry
//! (spec §4.10). `chain-keeper` consults [`RestrictionsKeeper::gate_transfer`]
//! before every coin transfer elsewhere in the core.

use chain_store::TypedStore;
use shared_types::{keys, Address, BlockContext, EmergencyExemption, ExemptionUsage, ModuleEvent, TransferRestriction};

use crate::domain;
use crate::errors::RestrictionError;
use crate::params::Params;

pub struct RestrictionsKeeper {
    pending_events: Vec<ModuleEvent>,
}

impl RestrictionsKeeper {
    pub fn new() -> Self {
        Self { pending_events: Vec::new() }
    }

    pub fn take_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Initialises the single global restriction record (genesis).
    pub fn init(&self, store: &mut impl TypedStore, params: &Params) -> Result<(), RestrictionError> {
        let record = TransferRestriction {
            restriction_end_block: params.restriction_end_block,
            lifted_event_emitted: false,
        };
        store.put_json(&keys::transfer_restriction_key(), &record)?;
        Ok(())
    }

    fn load_restriction(&self, store: &impl TypedStore) -> Result<TransferRestriction, RestrictionError> {
        Ok(store
            .get_json(&keys::transfer_restriction_key())?
            .unwrap_or(TransferRestriction { restriction_end_block: 0, lifted_event_emitted: true }))
    }

    fn all_exemptions(&self, store: &impl TypedStore) -> Result<Vec<EmergencyExemption>, RestrictionError> {
        Ok(store
            .prefix_scan_json::<EmergencyExemption>(&[keys::prefix::EMERGENCY_EXEMPTION])?
            .into_iter()
            .map(|(_, v)| v)
            .collect())
    }

    fn load_usage(&self, store: &impl TypedStore, exemption_id: &str, account: &str) -> Result<ExemptionUsage, RestrictionError> {
        Ok(store
            .get_json(&keys::exemption_usage_key(exemption_id, account))?
            .unwrap_or_else(|| ExemptionUsage { exemption_id: exemption_id.to_string(), account: account.to_string(), count: 0 }))
    }

    /// `ExecuteEmergencyTransfer` / every coin transfer's pre-check (spec §4.10).
    /// Allows unconditionally once `current_block >= restriction_end_block`;
    /// otherwise requires a matching, unexhausted exemption.
    pub fn gate_transfer(
        &mut self,
        store: &mut impl TypedStore,
        ctx: &BlockContext,
        from: &str,
        to: &str,
        amount: i64,
        denom: &str,
    ) -> Result<(), RestrictionError> {
        let restriction = self.load_restriction(store)?;
        if !restriction.is_active(ctx.height) {
            return Ok(());
        }

        let exemptions = self.all_exemptions(store)?;
        let exemption = domain::find_matching_exemption(&exemptions, from, to)
            .ok_or_else(|| RestrictionError::NoMatchingExemption(from.to_string(), to.to_string(), amount.to_string()))?
            .clone();

        let mut usage = self.load_usage(store, &exemption.exemption_id, from)?;
        domain::validate_exemption(&exemption, &usage, amount, ctx.height)?;

        usage.count += 1;
        store.put_json(&keys::exemption_usage_key(&exemption.exemption_id, from), &usage)?;

        self.pending_events.push(ModuleEvent::EmergencyTransfer {
            exemption_id: exemption.exemption_id.clone(),
            from_address: from.to_string(),
            to_address: to.to_string(),
            amount,
            denom: denom.to_string(),
            remaining_uses: exemption.usage_limit - usage.count,
        });
        Ok(())
    }

    /// Block-tick hook: emits `EventRestrictionLifted` exactly once, the
    /// block the restriction's end height is reached (spec §4.10).
    pub fn on_block_tick(&mut self, store: &mut impl TypedStore, ctx: &BlockContext) -> Result<(), RestrictionError> {
        let mut restriction = self.load_restriction(store)?;
        if domain::just_lifted(&restriction, ctx.height) {
            restriction.lifted_event_emitted = true;
            store.put_json(&keys::transfer_restriction_key(), &restriction)?;
            self.pending_events.push(ModuleEvent::RestrictionLifted {
                current_block: ctx.height,
                restriction_end_block: restriction.restriction_end_block,
            });
        }
        Ok(())
    }

    /// Governance-managed creation of a new exemption.
    pub fn create_exemption(
        &self,
        store: &mut impl TypedStore,
        exemption: EmergencyExemption,
    ) -> Result<(), RestrictionError> {
        let key = keys::emergency_exemption_key(&exemption.exemption_id);
        if store.exists(&key)? {
            return Err(RestrictionError::ExemptionExists(exemption.exemption_id));
        }
        if exemption.max_amount <= 0 {
            return Err(RestrictionError::InvalidInput("max_amount must be positive".into()));
        }
        store.put_json(&key, &exemption)?;
        Ok(())
    }

    /// Removes an exemption (governance action, or automatic cleanup once
    /// `expiry_block` has passed — spec §3: "deleted after expiry_block").
    pub fn delete_exemption(&self, store: &mut impl TypedStore, exemption_id: &str) -> Result<(), RestrictionError> {
        let key = keys::emergency_exemption_key(exemption_id);
        if !store.exists(&key)? {
            return Err(RestrictionError::ExemptionNotFound(exemption_id.to_string()));
        }
        store.delete(&key)?;
        Ok(())
    }

    /// Epoch/block housekeeping: prune exemptions whose `expiry_block` has
    /// passed, in address order (spec §5 determinism requirement).
    pub fn prune_expired_exemptions(&self, store: &mut impl TypedStore, ctx: &BlockContext) -> Result<Vec<Address>, RestrictionError> {
        let mut pruned = Vec::new();
        for exemption in self.all_exemptions(store)? {
            if ctx.height >= exemption.expiry_block {
                store.delete(&keys::emergency_exemption_key(&exemption.exemption_id))?;
                pruned.push(exemption.exemption_id);
            }
        }
        Ok(pruned)
    }

    pub fn get_exemption(&self, store: &impl TypedStore, exemption_id: &str) -> Result<EmergencyExemption, RestrictionError> {
        store
            .get_json(&keys::emergency_exemption_key(exemption_id))?
            .ok_or_else(|| RestrictionError::ExemptionNotFound(exemption_id.to_string()))
    }
}

impl Default for RestrictionsKeeper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_store::InMemoryStore;

    fn ctx(height: u64) -> BlockContext {
        BlockContext::new(height, height * 5, 1)
    }

    fn exemption(id: &str) -> EmergencyExemption {
        EmergencyExemption {
            exemption_id: id.to_string(),
            from_address: None,
            to_address: Some("treasury".into()),
            max_amount: 1_000,
            usage_limit: 2,
            expiry_block: 50,
            justification: "bootstrap liquidity".into(),
        }
    }

    #[test]
    fn transfer_allowed_once_restriction_ends() {
        let mut store = InMemoryStore::new();
        let mut keeper = RestrictionsKeeper::new();
        keeper.init(&mut store, &Params { restriction_end_block: 10 }).unwrap();

        keeper.gate_transfer(&mut store, &ctx(10), "alice", "bob", 500, "ngonka").unwrap();
    }

    #[test]
    fn transfer_without_exemption_is_rejected_during_restriction() {
        let mut store = InMemoryStore::new();
        let mut keeper = RestrictionsKeeper::new();
        keeper.init(&mut store, &Params { restriction_end_block: 100 }).unwrap();

        let err = keeper.gate_transfer(&mut store, &ctx(5), "alice", "bob", 500, "ngonka").unwrap_err();
        assert!(matches!(err, RestrictionError::NoMatchingExemption(..)));
    }

    #[test]
    fn exemption_allows_matching_transfer_and_tracks_usage() {
        let mut store = InMemoryStore::new();
        let mut keeper = RestrictionsKeeper::new();
        keeper.init(&mut store, &Params { restriction_end_block: 100 }).unwrap();
        keeper.create_exemption(&mut store, exemption("e1")).unwrap();

        keeper.gate_transfer(&mut store, &ctx(5), "alice", "treasury", 500, "ngonka").unwrap();
        keeper.gate_transfer(&mut store, &ctx(6), "alice", "treasury", 500, "ngonka").unwrap();

        let err = keeper.gate_transfer(&mut store, &ctx(7), "alice", "treasury", 500, "ngonka").unwrap_err();
        assert!(matches!(err, RestrictionError::ExemptionUsesExhausted { .. }));
    }

    #[test]
    fn usage_is_scoped_per_spending_account() {
        let mut store = InMemoryStore::new();
        let mut keeper = RestrictionsKeeper::new();
        keeper.init(&mut store, &Params { restriction_end_block: 100 }).unwrap();
        keeper.create_exemption(&mut store, exemption("e1")).unwrap();

        keeper.gate_transfer(&mut store, &ctx(5), "alice", "treasury", 500, "ngonka").unwrap();
        keeper.gate_transfer(&mut store, &ctx(5), "alice", "treasury", 500, "ngonka").unwrap();
        // bob has never used this exemption; his count starts fresh.
        keeper.gate_transfer(&mut store, &ctx(5), "bob", "treasury", 500, "ngonka").unwrap();
    }

    #[test]
    fn restriction_lifted_event_fires_once() {
        let mut store = InMemoryStore::new();
        let mut keeper = RestrictionsKeeper::new();
        keeper.init(&mut store, &Params { restriction_end_block: 10 }).unwrap();

        keeper.on_block_tick(&mut store, &ctx(10)).unwrap();
        assert_eq!(keeper.take_events().len(), 1);

        keeper.on_block_tick(&mut store, &ctx(11)).unwrap();
        assert!(keeper.take_events().is_empty());
    }

    #[test]
    fn creating_duplicate_exemption_id_is_rejected() {
        let mut store = InMemoryStore::new();
        let keeper = RestrictionsKeeper::new();
        keeper.create_exemption(&mut store, exemption("e1")).unwrap();
        let err = keeper.create_exemption(&mut store, exemption("e1")).unwrap_err();
        assert!(matches!(err, RestrictionError::ExemptionExists(_)));
    }

    #[test]
    fn prune_removes_expired_exemptions() {
        let mut store = InMemoryStore::new();
        let keeper = RestrictionsKeeper::new();
        keeper.create_exemption(&mut store, exemption("e1")).unwrap();

        let pruned = keeper.prune_expired_exemptions(&mut store, &ctx(50)).unwrap();
        assert_eq!(pruned, vec!["e1".to_string()]);
        assert!(matches!(
            keeper.get_exemption(&store, "e1").unwrap_err(),
            RestrictionError::ExemptionNotFound(_)
        ));
    }
}
