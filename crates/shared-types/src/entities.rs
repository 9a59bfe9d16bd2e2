//! # Core Domain Entities
//!
//! The on-chain record types for the inference-payment, reputation,
//! collateral, vesting, and DKG modules (data model, spec §3).
//!
//! ## Clusters
//!
//! - **Participants**: `Participant`, `ParticipantStatus`, `EpochStats`
//! - **Inference**: `Inference`, `InferenceStatus`
//! - **Collateral & vesting**: `UnbondingEntry`, `VestingSchedule`
//! - **DKG**: `EpochBlsData`, `DkgPhase`, `SlotRange`, `DealerPart`, `VerificationVector`
//! - **Restrictions**: `TransferRestriction`, `EmergencyExemption`

use serde::{Deserialize, Serialize};
use shared_decimal::Decimal;

/// A bech32-encoded participant/account address (data-model invariant 6).
pub type Address = String;

// =============================================================================
// CLUSTER A: PARTICIPANTS
// =============================================================================

/// Lifecycle state of a registered participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantStatus {
    Active,
    Inactive,
    Jailed,
}

/// Per-epoch bookkeeping accumulated while the epoch is still open; folded
/// into `Participant::epochs_completed`/miss history at epoch close.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochStats {
    pub requests_served: u64,
    pub requests_missed: u64,
}

impl EpochStats {
    /// Fraction of requests missed this epoch, in `[0, 1]` represented as
    /// a `(numerator, denominator)` pair so callers can feed it into exact
    /// decimal arithmetic without lossy float division.
    pub fn miss_fraction_parts(&self) -> (u64, u64) {
        let total = self.requests_served + self.requests_missed;
        if total == 0 {
            (0, 1)
        } else {
            (self.requests_missed, total)
        }
    }
}

/// An address registered to offer compute and earn rewards (spec GLOSSARY).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub address: Address,
    /// This participant's fraction of total network compute this epoch,
    /// normalised so the whole network sums to 1. An exact decimal, never
    /// a float (spec §5: "All floating-point is forbidden").
    pub weight: Decimal,
    /// Bounded integer 0-100, derived from epoch history (C2).
    pub reputation: u8,
    pub status: ParticipantStatus,
    pub validator_key: Vec<u8>,
    pub worker_key: Vec<u8>,
    pub inference_url: String,
    pub epochs_completed: u64,
    /// Per-epoch miss fractions, oldest first, used by the reputation
    /// penalty accumulator (§4.2).
    pub miss_history: Vec<(u64, Decimal)>,
    pub last_inference_time: u64,
    pub join_time: u64,
    pub current_epoch_stats: EpochStats,
}

impl Participant {
    pub fn new(address: Address, validator_key: Vec<u8>, worker_key: Vec<u8>, inference_url: String, join_time: u64) -> Self {
        Self {
            address,
            weight: Decimal::zero(),
            reputation: 0,
            status: ParticipantStatus::Active,
            validator_key,
            worker_key,
            inference_url,
            epochs_completed: 0,
            miss_history: Vec::new(),
            last_inference_time: 0,
            join_time,
            current_epoch_stats: EpochStats::default(),
        }
    }
}

// =============================================================================
// CLUSTER B: INFERENCE
// =============================================================================

/// Lifecycle state of a single inference request (C1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InferenceStatus {
    Started,
    Finished,
    Validated,
    Invalidated,
}

/// A single model-serving request with a unique id (spec GLOSSARY).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    pub id: String,
    pub status: InferenceStatus,
    pub model: String,
    pub prompt_hash: [u8; 32],
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub max_tokens: u64,
    /// Frozen at Start; Finish never overwrites a non-zero price (invariant 7).
    pub per_token_price: u64,
    pub escrow_amount: i64,
    pub actual_cost: i64,
    pub start_block: u64,
    pub end_block: u64,
    pub requested_by: Address,
    pub executed_by: Address,
    pub assigned_to: Address,
    pub transferred_by: Option<Address>,
    pub developer_signature: Option<String>,
    pub executor_signature: Option<String>,
}

impl Inference {
    /// True once both Start and Finish have been reconciled into this record.
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status,
            InferenceStatus::Finished | InferenceStatus::Validated | InferenceStatus::Invalidated
        ) && !self.executed_by.is_empty()
            && self.escrow_amount >= 0
    }
}

// =============================================================================
// CLUSTER C: COLLATERAL & VESTING
// =============================================================================

/// `(completion_epoch, participant) -> amount`, keyed so iteration in key
/// order is chronological order (invariant 4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnbondingEntry {
    pub participant: Address,
    pub completion_epoch: u64,
    pub amount: i64,
}

/// Per-participant ordered list of epoch-indexed release amounts.
/// `epoch_amounts[0]` vests at the next epoch close, `[1]` the one after, etc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VestingSchedule {
    pub participant: Address,
    pub epoch_amounts: Vec<i64>,
}

impl VestingSchedule {
    pub fn total(&self) -> i64 {
        self.epoch_amounts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.epoch_amounts.is_empty()
    }
}

// =============================================================================
// CLUSTER D: DISTRIBUTED KEY GENERATION
// =============================================================================

/// Phase of a DKG epoch's state machine (§4.7). Transitions only move
/// forward: `Dealing -> Verifying -> {Completed -> Signed, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DkgPhase {
    Dealing,
    Verifying,
    Completed,
    Signed,
    Failed,
}

impl DkgPhase {
    /// Whether `next` is a legal forward transition from `self`
    /// (data-model invariant 5).
    pub fn can_transition_to(self, next: DkgPhase) -> bool {
        matches!(
            (self, next),
            (DkgPhase::Dealing, DkgPhase::Verifying)
                | (DkgPhase::Dealing, DkgPhase::Failed)
                | (DkgPhase::Verifying, DkgPhase::Completed)
                | (DkgPhase::Verifying, DkgPhase::Failed)
                | (DkgPhase::Completed, DkgPhase::Signed)
        )
    }
}

/// The contiguous slot range a participant owns in the DKG's slot partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRange {
    pub slot_start: u32,
    pub slot_end: u32,
}

impl SlotRange {
    pub fn slot_count(&self) -> u32 {
        self.slot_end - self.slot_start + 1
    }
}

/// One participant's slot allocation for a DKG epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DkgParticipant {
    pub address: Address,
    pub slots: SlotRange,
}

/// A dealer's commitment vector, submitted once per dealer during DEALING.
/// `commitments[0]` is `C_{k,0}`, the 96-byte compressed G2 point summed
/// into the group public key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerPart {
    pub dealer_index: u32,
    pub commitments: Vec<[u8; 96]>,
}

/// A verifier's per-dealer validity vector, submitted once per verifier
/// during VERIFYING.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationVector {
    pub verifier_index: u32,
    pub dealer_validity: Vec<bool>,
}

/// One DKG epoch's full state (§3, §4.7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochBlsData {
    pub epoch_id: u64,
    pub participants: Vec<DkgParticipant>,
    pub t_slots_degree: u32,
    pub i_total_slots: u32,
    pub phase: DkgPhase,
    pub dealing_deadline: u64,
    pub verifying_deadline: u64,
    pub dealer_parts: Vec<Option<DealerPart>>,
    pub verification_submissions: Vec<Option<VerificationVector>>,
    pub valid_dealers: Vec<bool>,
    pub group_public_key: Option<[u8; 96]>,
}

// =============================================================================
// CLUSTER E: TRANSFER RESTRICTIONS
// =============================================================================

/// Governance-managed waiver of the bootstrap transfer lock.
///
/// Usage is tracked per `(exemption_id, spending_account)` pair in a
/// separate [`ExemptionUsage`] record rather than as a scalar on this
/// struct — the data model (spec §3) scopes `TransferRestriction`'s
/// `exemption_usage[]` independently of the exemption definition itself,
/// so two different accounts drawing on the same shared (`*`-scoped)
/// exemption don't exhaust each other's allowance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyExemption {
    pub exemption_id: String,
    /// `None` means "any address" (the spec's `*` wildcard).
    pub from_address: Option<Address>,
    pub to_address: Option<Address>,
    pub max_amount: i64,
    pub usage_limit: u32,
    pub expiry_block: u64,
    pub justification: String,
}

impl EmergencyExemption {
    pub fn matches(&self, from: &str, to: &str) -> bool {
        self.from_address.as_deref().map_or(true, |f| f == from)
            && self.to_address.as_deref().map_or(true, |t| t == to)
    }
}

/// Per-`(exemption_id, spending_account)` usage counter (spec §3's
/// `TransferRestriction.exemption_usage[]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExemptionUsage {
    pub exemption_id: String,
    pub account: Address,
    pub count: u32,
}

// =============================================================================
// CLUSTER F: SIGNATURE AUTHORIZATION
// =============================================================================

/// `owner`'s registered signing delegates for the transfer-agent and
/// executor-agent roles (spec §4.9: "grantee fan-out" — a signature from
/// any key in this set, or the owner's own key, is accepted).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GranteeRegistry {
    pub owner: Address,
    pub grantee_pubkeys: Vec<[u8; 33]>,
}

impl GranteeRegistry {
    pub fn new(owner: Address) -> Self {
        Self { owner, grantee_pubkeys: Vec::new() }
    }
}

/// The single global transfer-restriction record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRestriction {
    pub restriction_end_block: u64,
    pub lifted_event_emitted: bool,
}

impl TransferRestriction {
    pub fn is_active(&self, current_block: u64) -> bool {
        self.restriction_end_block > 0 && current_block < self.restriction_end_block
    }
}
