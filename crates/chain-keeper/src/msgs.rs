//! The external message surface (spec §6's "Message surface" table).
//!
//! Each variant carries exactly the fields the table lists; the Start/
//! Finish payloads are the domain structs `im-01-inference` already
//! defines, since that crate owns their shape.

use im_01_inference::{FinishInferenceMsg, StartInferenceMsg};
use shared_decimal::Decimal;
use shared_types::Address;

#[derive(Debug, Clone)]
pub struct SubmitNewParticipantMsg {
    pub address: Address,
    pub validator_key: Vec<u8>,
    pub worker_key: Vec<u8>,
    pub inference_url: String,
}

#[derive(Debug, Clone)]
pub struct DepositCollateralMsg {
    pub participant: Address,
    pub amount: i64,
}

#[derive(Debug, Clone)]
pub struct WithdrawCollateralMsg {
    pub participant: Address,
    pub amount: i64,
}

#[derive(Debug, Clone)]
pub struct SlashMsg {
    pub participant: Address,
    pub fraction: Decimal,
}

#[derive(Debug, Clone)]
pub struct UnjailMsg {
    pub participant: Address,
}

#[derive(Debug, Clone)]
pub struct SubmitDealerPartMsg {
    pub epoch_id: u64,
    pub dealer_index: u32,
    pub commitments: Vec<[u8; 96]>,
}

#[derive(Debug, Clone)]
pub struct SubmitVerificationVectorMsg {
    pub epoch_id: u64,
    pub verifier_index: u32,
    pub dealer_validity: Vec<bool>,
}

#[derive(Debug, Clone)]
pub struct ExecuteEmergencyTransferMsg {
    pub from: Address,
    pub to: Address,
    pub amount: i64,
    pub denom: String,
}

#[derive(Debug, Clone)]
pub struct AddVestingMsg {
    pub granter: Address,
    pub participant: Address,
    pub total: i64,
    pub n_epochs: u32,
}

/// The full external message surface (spec §6). `chain-keeper::Keeper::apply`
/// dispatches on this; signature verification (C9) is the caller's
/// responsibility before a `Msg` reaches `apply` — see spec §4.1's "All
/// signatures ... verified by C9 before the state-machine handler is called".
#[derive(Debug, Clone)]
pub enum Msg {
    StartInference(StartInferenceMsg),
    FinishInference(FinishInferenceMsg),
    SubmitNewParticipant(SubmitNewParticipantMsg),
    DepositCollateral(DepositCollateralMsg),
    WithdrawCollateral(WithdrawCollateralMsg),
    Slash(SlashMsg),
    Unjail(UnjailMsg),
    SubmitDealerPart(SubmitDealerPartMsg),
    SubmitVerificationVector(SubmitVerificationVectorMsg),
    ExecuteEmergencyTransfer(ExecuteEmergencyTransferMsg),
    AddVesting(AddVestingMsg),
}
