//! Events emitted by module keepers (spec §6 "Events emitted").
//!
//! Unlike the teacher's `shared-bus::BlockchainEvent`, which travels over
//! an async channel between independent subsystem services, these events
//! are plain records a keeper pushes into a pending list and the
//! orchestrator drains synchronously at the end of block application (see
//! SPEC_FULL.md §A.4) — there is no subscriber/channel machinery here
//! because the core forbids background work.

use serde::{Deserialize, Serialize};

use crate::entities::Address;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModuleEvent {
    DepositCollateral { participant: Address, amount: i64 },
    WithdrawCollateral { participant: Address, amount: i64, completion_epoch: u64 },
    SlashCollateral { participant: Address, slash_fraction: String, amount_burned: i64 },
    ProcessWithdrawal { participant: Address, amount: i64, completion_epoch: u64 },
    ParticipantJailed { participant: Address },
    ParticipantUnjailed { participant: Address },

    VestingGranted { participant: Address, total: i64, epochs: u32 },
    VestingReleased { participant: Address, amount: i64 },

    EmergencyTransfer {
        exemption_id: String,
        from_address: Address,
        to_address: Address,
        amount: i64,
        denom: String,
        remaining_uses: u32,
    },
    RestrictionLifted { current_block: u64, restriction_end_block: u64 },

    VerifyingPhaseStarted { epoch_id: u64, verifying_deadline: u64 },
    GroupPublicKeyGenerated { epoch_id: u64, chain_id: u64, group_public_key: [u8; 96] },
    DkgFailed { epoch_id: u64, reason: String },

    InferenceStarted { inference_id: String, escrow_amount: i64, per_token_price: u64 },
    InferenceFinished { inference_id: String, actual_cost: i64, paid_to_executor: i64, refund_to_requester: i64 },

    ValidationSampled { inference_id: String, validator: Address, selected: bool },
    WorkShareRedistributed { inference_id: String, adjustments: Vec<(Address, i64)> },
}
