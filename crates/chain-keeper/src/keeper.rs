//! Wires the eight module keepers over one block-application loop (spec
//! §2, §5): deadline-triggered transitions run first, then user messages,
//! each message's writes committed or rolled back as a unit, and every
//! keeper's pending events drained through [`chain_event_bus::EventBus`]
//! at the end.

use chain_event_bus::EventBus;
use chain_store::TypedStore;
use im_01_inference::{FixedPriceOracle, InferenceKeeper, PricingOracle};
use im_02_reputation::ReputationKeeper;
use im_03_workshare::WorkshareKeeper;
use im_04_collateral::CollateralKeeper;
use im_05_vesting::VestingKeeper;
use im_06_dkg::DkgKeeper;
use im_07_auth::AuthKeeper;
use im_08_restrictions::RestrictionsKeeper;
use shared_types::{fatal, BlockContext};

use crate::bank::LedgerBank;
use crate::config::Config;
use crate::errors::AppError;
use crate::msgs::Msg;

/// The orchestrator. Holds the ledger bank, the governance config, every
/// module keeper, and the event bus they drain into — but never the
/// store itself, matching each module keeper's own convention of taking
/// `store: &mut impl TypedStore` per call rather than owning it (spec §5:
/// "the ordered KV store ... [is a] shared resource ... mutated
/// exclusively by the active handler").
pub struct Keeper {
    config: Config,
    pub bank: LedgerBank,
    pub events: EventBus,
    oracle: Box<dyn PricingOracle>,

    inference: InferenceKeeper,
    reputation: ReputationKeeper,
    workshare: WorkshareKeeper,
    collateral: CollateralKeeper,
    vesting: VestingKeeper,
    dkg: DkgKeeper,
    auth: AuthKeeper,
    restrictions: RestrictionsKeeper,
}

impl Keeper {
    pub fn new(config: Config) -> Self {
        Self::with_oracle(config, Box::new(FixedPriceOracle(None)))
    }

    pub fn with_oracle(config: Config, oracle: Box<dyn PricingOracle>) -> Self {
        Self {
            inference: InferenceKeeper::new(config.inference.clone()),
            reputation: ReputationKeeper::new(config.reputation.clone()),
            workshare: WorkshareKeeper::new(),
            collateral: CollateralKeeper::new(config.collateral.clone()),
            vesting: VestingKeeper::new(),
            dkg: DkgKeeper::new(config.dkg.clone()),
            auth: AuthKeeper::new(config.auth.clone()),
            restrictions: RestrictionsKeeper::new(),
            bank: LedgerBank::new(),
            events: EventBus::new(),
            oracle,
            config,
        }
    }

    pub fn auth(&self) -> &AuthKeeper {
        &self.auth
    }

    pub fn reputation(&self) -> &ReputationKeeper {
        &self.reputation
    }

    pub fn collateral_account(
        &self,
        store: &impl TypedStore,
        participant: &str,
    ) -> Result<im_04_collateral::domain::CollateralAccount, AppError> {
        Ok(self.collateral.get(store, participant)?)
    }

    /// Genesis setup: seeds the single global restriction record.
    pub fn init_genesis(&self, store: &mut impl TypedStore) -> Result<(), AppError> {
        self.restrictions.init(store, &self.config.restrictions)?;
        Ok(())
    }

    /// Governance action (spec §4.7): seeds a new DKG epoch, outside the
    /// message surface because deciding *when* a key-generation round
    /// starts is an orchestrator concern the module itself stays agnostic
    /// to (see `DkgKeeper::start_epoch`'s own doc comment).
    pub fn start_dkg_epoch(&mut self, store: &mut impl TypedStore, epoch: shared_types::EpochBlsData) -> Result<(), AppError> {
        self.dkg.start_epoch(store, epoch)?;
        self.drain_events();
        Ok(())
    }

    /// Records that the active epoch's group public key has been used to
    /// co-sign a block (spec §4.7's terminal `SIGNED` phase).
    pub fn mark_dkg_signed(&mut self, store: &mut impl TypedStore, epoch_id: u64) -> Result<(), AppError> {
        self.dkg.mark_signed(store, epoch_id)?;
        self.drain_events();
        Ok(())
    }

    pub fn dkg_epoch(&self, store: &impl TypedStore, epoch_id: u64) -> Result<shared_types::EpochBlsData, AppError> {
        Ok(self.dkg.get(store, epoch_id)?)
    }

    /// Governance action (spec §4.10): registers a new emergency exemption.
    pub fn create_exemption(
        &mut self,
        store: &mut impl TypedStore,
        exemption: shared_types::EmergencyExemption,
    ) -> Result<(), AppError> {
        self.restrictions.create_exemption(store, exemption)?;
        Ok(())
    }

    /// Runs the deadline-triggered transitions that spec §2/§5 require to
    /// fire before any user message this block: DKG phase moves and the
    /// restriction-lift check, both keyed off `ctx.height`. `epoch_close`
    /// carries the epoch number when the host's external `EpochClock`
    /// (spec §2 diagram) reports this block closes an epoch — vesting
    /// releases, unbonding maturations and reputation accrual are
    /// epoch-keyed, not block-keyed, so they only run then.
    pub fn begin_block(
        &mut self,
        store: &mut impl TypedStore,
        ctx: &BlockContext,
        epoch_close: Option<u64>,
    ) -> Result<(), AppError> {
        self.dkg.on_block_tick(store, ctx)?;
        self.restrictions.on_block_tick(store, ctx)?;

        if let Some(epoch) = epoch_close {
            tracing::debug!(height = ctx.height, epoch, "closing epoch");
            self.reputation.epoch_close_accrue_reputation(store)?;
            self.vesting.epoch_close_release(store, &mut self.bank)?;
            self.collateral.epoch_close_release_unbonding(store, &mut self.bank, epoch)?;
        }

        self.drain_events();
        Ok(())
    }

    /// Applies one user message (spec §6). Signature verification (C9) is
    /// expected to have already run against the message's envelope before
    /// it reaches here — this keeper trusts its caller, the same
    /// assumption `im-01-inference::InferenceKeeper` documents for itself.
    pub fn apply(&mut self, store: &mut impl TypedStore, ctx: &BlockContext, msg: Msg) -> Result<(), AppError> {
        let result = match msg {
            Msg::StartInference(m) => self
                .inference
                .handle_start(ctx, store, &mut self.bank, self.oracle.as_ref(), m)
                .map_err(AppError::from),
            Msg::FinishInference(m) => {
                let executed_by = m.executed_by.clone();
                self.inference
                    .handle_finish(ctx, store, &mut self.bank, self.oracle.as_ref(), m)
                    .map_err(AppError::from)?;
                // Best-effort attendance bookkeeping (spec §4.2): a Finish
                // that reconciles against a record means the executor
                // served the request this epoch. Participants that were
                // never registered (e.g. test harnesses) are skipped
                // rather than surfaced as an error — C1 and C2 are
                // independently owned modules and neither blocks the other.
                if self.reputation.get(store, &executed_by).is_ok() {
                    self.reputation.record_request_outcome(store, ctx, &executed_by, true)?;
                }
                Ok(())
            }
            Msg::SubmitNewParticipant(m) => self
                .reputation
                .submit_new_participant(store, ctx, m.address, m.validator_key, m.worker_key, m.inference_url)
                .map_err(AppError::from),
            Msg::DepositCollateral(m) => self
                .collateral
                .deposit(store, &mut self.bank, m.participant, m.amount, self.config.collateral.denom)
                .map_err(AppError::from),
            Msg::WithdrawCollateral(m) => {
                let current_epoch = ctx.height;
                self.collateral
                    .withdraw(store, &mut self.bank, m.participant, m.amount, current_epoch)
                    .map_err(AppError::from)
            }
            Msg::Slash(m) => {
                let current_epoch = ctx.height;
                self.collateral
                    .slash(store, &mut self.bank, &m.participant, m.fraction, current_epoch)
                    .map_err(AppError::from)?;
                self.reputation.mark_jailed(store, &m.participant).ok();
                Ok(())
            }
            Msg::Unjail(m) => {
                let current_epoch = ctx.height;
                self.collateral.unjail(store, &m.participant, current_epoch)?;
                self.reputation.mark_active(store, &m.participant).ok();
                Ok(())
            }
            Msg::SubmitDealerPart(m) => self
                .dkg
                .submit_dealer_part(store, m.epoch_id, m.dealer_index, m.commitments)
                .map_err(AppError::from),
            Msg::SubmitVerificationVector(m) => self
                .dkg
                .submit_verification_vector(store, m.epoch_id, m.verifier_index, m.dealer_validity)
                .map_err(AppError::from),
            Msg::ExecuteEmergencyTransfer(m) => {
                if m.denom != self.config.collateral.denom.0 {
                    return Err(AppError::Bank(format!(
                        "unsupported denom {} for emergency transfer",
                        m.denom
                    )));
                }
                self.restrictions.gate_transfer(store, ctx, &m.from, &m.to, m.amount, &m.denom)?;
                LedgerBankTransfer::transfer(&mut self.bank, &m.from, &m.to, m.amount)
                    .map_err(AppError::Bank)?;
                Ok(())
            }
            Msg::AddVesting(m) => self
                .vesting
                .add_vesting(store, &mut self.bank, &m.granter, m.participant, m.total, m.n_epochs)
                .map_err(AppError::from),
        };

        self.drain_events();
        result
    }

    /// `P(validate)` plus the deterministic draw for one served request
    /// (spec §4.2). Not part of [`Msg`] — the host calls this as a pure
    /// query alongside message application, the way the spec's component
    /// diagram shows the sampler reading from, not writing to, state.
    #[allow(clippy::too_many_arguments)]
    pub fn should_validate(
        &self,
        executor_reputation: u8,
        traffic_basis: u64,
        validator_power: u64,
        executor_power: u64,
        total_power: u64,
        seed: &str,
        inference_id: &str,
    ) -> bool {
        self.reputation.should_validate(
            executor_reputation,
            traffic_basis,
            validator_power,
            executor_power,
            total_power,
            seed,
            inference_id,
        )
    }

    pub fn calculate_invalidations(&self, inferences_processed: u64, weight: &shared_decimal::Decimal, reputation: u8) -> i64 {
        self.reputation.calculate_invalidations(inferences_processed, weight, reputation)
    }

    /// Redistributes a settled inference's payout across a new validator
    /// set (spec §4.4), outside the block-message flow because it is
    /// triggered by the reputation sampler's own validation outcome, not
    /// by a user-submitted message.
    pub fn redistribute_work_share(
        &mut self,
        existing: &[shared_types::Address],
        new: &[shared_types::Address],
        cost: i64,
    ) -> Result<Vec<im_03_workshare::Adjustment>, AppError> {
        self.workshare
            .redistribute(&mut self.bank, existing, new, cost)
            .map_err(AppError::from)
    }

    /// Asserts data-model invariant 3 (`collateral + unbonding == bank
    /// balance` holds trivially for this in-process ledger; the check
    /// here is the conservation half that crosses module boundaries) by
    /// comparing the bank's total supply against a caller-supplied
    /// expectation captured before the block started. A mismatch is a
    /// coin-conservation break (spec invariant 1) — fatal, not
    /// recoverable (spec §7).
    pub fn assert_conservation(&self, expected_total_supply: i64) {
        let actual = self.bank.total_supply();
        if actual != expected_total_supply {
            fatal(
                "coin-conservation",
                format!("total supply drifted from {expected_total_supply} to {actual}"),
            );
        }
    }

    fn drain_events(&mut self) {
        for events in [
            self.inference.take_events(),
            self.collateral.take_events(),
            self.vesting.take_events(),
            self.dkg.take_events(),
            self.restrictions.take_events(),
        ] {
            self.events.publish_all(events);
        }
    }
}

/// Tiny helper so `ExecuteEmergencyTransfer` can move spendable coins
/// directly without going through any one module's bank trait (it is a
/// plain transfer, not an escrow/collateral/vesting operation).
struct LedgerBankTransfer;

impl LedgerBankTransfer {
    fn transfer(bank: &mut LedgerBank, from: &str, to: &str, amount: i64) -> Result<(), String> {
        if amount <= 0 {
            return Err(format!("transfer amount must be positive, got {amount}"));
        }
        let from = from.to_string();
        let to = to.to_string();
        let balance = bank.spendable.entry(from.clone()).or_insert(0);
        if *balance < amount {
            return Err(format!("{from} has {balance}, needs {amount}"));
        }
        *balance -= amount;
        bank.credit(&to, amount);
        Ok(())
    }
}
