//! `SubmitDealerPart` / `SubmitVerificationVector` and the block-tick
//! deadline-driven phase transitions (spec §4.7).

use chain_store::TypedStore;
use shared_crypto::bls_g2::G2Point;
use shared_types::{keys, BlockContext, DealerPart, DkgPhase, EpochBlsData, ModuleEvent, VerificationVector};

use crate::domain;
use crate::errors::DkgError;
use crate::params::Params;

pub struct DkgKeeper {
    params: Params,
    pending_events: Vec<ModuleEvent>,
}

impl DkgKeeper {
    pub fn new(params: Params) -> Self {
        Self { params, pending_events: Vec::new() }
    }

    pub fn take_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Seed a new DKG epoch and mark it the active one (called by the
    /// orchestrator when it decides a new key generation round is due —
    /// outside this crate's scope per spec §4.7, which only describes the
    /// machine from DEALING onward).
    pub fn start_epoch(&mut self, store: &mut impl TypedStore, epoch: EpochBlsData) -> Result<(), DkgError> {
        let key = keys::dkg_epoch_key(epoch.epoch_id);
        store.put_json(&key, &epoch)?;
        store.put_json(&keys::dkg_active_epoch_pointer_key(), &epoch.epoch_id)?;
        Ok(())
    }

    fn active_epoch(&self, store: &impl TypedStore) -> Result<Option<EpochBlsData>, DkgError> {
        let pointer: Option<u64> = store.get_json(&keys::dkg_active_epoch_pointer_key())?;
        match pointer {
            None => Ok(None),
            Some(epoch_id) => store
                .get_json(&keys::dkg_epoch_key(epoch_id))?
                .ok_or(DkgError::EpochNotFound(epoch_id))
                .map(Some),
        }
    }

    fn load_epoch(&self, store: &impl TypedStore, epoch_id: u64) -> Result<EpochBlsData, DkgError> {
        store.get_json(&keys::dkg_epoch_key(epoch_id))?.ok_or(DkgError::EpochNotFound(epoch_id))
    }

    /// `SubmitDealerPart` (spec §4.7): appends into the dealer's fixed slot.
    /// Only legal during DEALING.
    pub fn submit_dealer_part(
        &mut self,
        store: &mut impl TypedStore,
        epoch_id: u64,
        dealer_index: u32,
        commitments: Vec<[u8; 96]>,
    ) -> Result<(), DkgError> {
        if commitments.is_empty() {
            return Err(DkgError::EmptyCommitments);
        }
        let mut epoch = self.load_epoch(store, epoch_id)?;
        if epoch.phase != DkgPhase::Dealing {
            return Err(DkgError::WrongPhase { epoch_id, phase: epoch.phase, action: "dealer part" });
        }
        let idx = dealer_index as usize;
        if idx >= epoch.dealer_parts.len() {
            return Err(DkgError::DealerIndexOutOfRange(dealer_index));
        }

        epoch.dealer_parts[idx] = Some(DealerPart { dealer_index, commitments });
        store.put_json(&keys::dkg_epoch_key(epoch_id), &epoch)?;
        Ok(())
    }

    /// `SubmitVerificationVector` (spec §4.7). Only legal during VERIFYING.
    pub fn submit_verification_vector(
        &mut self,
        store: &mut impl TypedStore,
        epoch_id: u64,
        verifier_index: u32,
        dealer_validity: Vec<bool>,
    ) -> Result<(), DkgError> {
        let mut epoch = self.load_epoch(store, epoch_id)?;
        if epoch.phase != DkgPhase::Verifying {
            return Err(DkgError::WrongPhase { epoch_id, phase: epoch.phase, action: "verification vector" });
        }
        let idx = verifier_index as usize;
        if idx >= epoch.verification_submissions.len() {
            return Err(DkgError::VerifierIndexOutOfRange(verifier_index));
        }
        if dealer_validity.len() != epoch.dealer_parts.len() {
            return Err(DkgError::DealerValidityLengthMismatch {
                got: dealer_validity.len(),
                expected: epoch.dealer_parts.len(),
            });
        }

        epoch.verification_submissions[idx] = Some(VerificationVector { verifier_index, dealer_validity });
        store.put_json(&keys::dkg_epoch_key(epoch_id), &epoch)?;
        Ok(())
    }

    /// Drives the deadline-triggered phase transitions (spec §4.7): looks
    /// up the active epoch, if any, and advances it once `ctx.height`
    /// reaches the relevant deadline. A no-op if no epoch is active or no
    /// deadline has been reached yet.
    pub fn on_block_tick(&mut self, store: &mut impl TypedStore, ctx: &BlockContext) -> Result<(), DkgError> {
        let Some(mut epoch) = self.active_epoch(store)? else {
            return Ok(());
        };

        match epoch.phase {
            DkgPhase::Dealing if ctx.height >= epoch.dealing_deadline => {
                if domain::dealing_quorum_met(&epoch) {
                    epoch.phase = DkgPhase::Verifying;
                    epoch.verifying_deadline = ctx.height + self.params.verification_phase_duration_blocks;
                    self.pending_events.push(ModuleEvent::VerifyingPhaseStarted {
                        epoch_id: epoch.epoch_id,
                        verifying_deadline: epoch.verifying_deadline,
                    });
                    store.put_json(&keys::dkg_epoch_key(epoch.epoch_id), &epoch)?;
                } else {
                    self.fail_epoch(store, epoch, "insufficient dealer-part quorum at dealing deadline")?;
                }
            }
            DkgPhase::Verifying if ctx.height >= epoch.verifying_deadline => {
                if domain::verifying_quorum_met(&epoch) {
                    let valid_dealers = domain::compute_valid_dealers(&epoch);
                    let commitments: Vec<G2Point> = epoch
                        .dealer_parts
                        .iter()
                        .zip(valid_dealers.iter())
                        .filter(|(_, &valid)| valid)
                        .filter_map(|(part, _)| part.as_ref())
                        .map(|part| G2Point::from_bytes(&part.commitments[0]))
                        .collect::<Result<Vec<_>, _>>()?;

                    if commitments.is_empty() {
                        self.fail_epoch(store, epoch, "no valid dealers after verification")?;
                    } else {
                        let group_key = G2Point::sum(&commitments)?;
                        epoch.valid_dealers = valid_dealers;
                        epoch.group_public_key = Some(group_key.to_bytes());
                        epoch.phase = DkgPhase::Completed;
                        store.put_json(&keys::dkg_epoch_key(epoch.epoch_id), &epoch)?;
                        store.delete(&keys::dkg_active_epoch_pointer_key())?;

                        self.pending_events.push(ModuleEvent::GroupPublicKeyGenerated {
                            epoch_id: epoch.epoch_id,
                            chain_id: ctx.chain_id,
                            group_public_key: epoch.group_public_key.expect("just set"),
                        });
                    }
                } else {
                    self.fail_epoch(store, epoch, "insufficient verification quorum at verifying deadline")?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn fail_epoch(&mut self, store: &mut impl TypedStore, mut epoch: EpochBlsData, reason: &str) -> Result<(), DkgError> {
        epoch.phase = DkgPhase::Failed;
        store.put_json(&keys::dkg_epoch_key(epoch.epoch_id), &epoch)?;
        store.delete(&keys::dkg_active_epoch_pointer_key())?;
        self.pending_events.push(ModuleEvent::DkgFailed { epoch_id: epoch.epoch_id, reason: reason.to_string() });
        Ok(())
    }

    /// Marks a COMPLETED epoch SIGNED once the threshold signature has been
    /// produced (spec §4.7: `COMPLETED -> SIGNED "after threshold sign"`).
    /// The signature itself is out of this crate's scope; callers supply
    /// the fact that it succeeded.
    pub fn mark_signed(&mut self, store: &mut impl TypedStore, epoch_id: u64) -> Result<(), DkgError> {
        let mut epoch = self.load_epoch(store, epoch_id)?;
        if epoch.phase != DkgPhase::Completed {
            return Err(DkgError::WrongPhase { epoch_id, phase: epoch.phase, action: "mark signed" });
        }
        epoch.phase = DkgPhase::Signed;
        store.put_json(&keys::dkg_epoch_key(epoch_id), &epoch)?;
        Ok(())
    }

    pub fn get(&self, store: &impl TypedStore, epoch_id: u64) -> Result<EpochBlsData, DkgError> {
        self.load_epoch(store, epoch_id)
    }
}

impl Default for DkgKeeper {
    fn default() -> Self {
        Self::new(Params::default())
    }
}
