//! Deterministic payload-byte construction and timestamp policing (spec §4.9).
//!
//! Nothing here touches the store or a public key; `keeper` wires these
//! pure functions to the grantee registry and to `shared_crypto::ecdsa`.

use crate::errors::AuthError;
use crate::params::Params;

/// The three roles that sign a request (spec §4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerRole {
    Developer,
    TransferAgent,
    ExecutorAgent,
}

impl SignerRole {
    pub fn label(self) -> &'static str {
        match self {
            SignerRole::Developer => "developer",
            SignerRole::TransferAgent => "transfer_agent",
            SignerRole::ExecutorAgent => "executor_agent",
        }
    }
}

/// `dev_bytes = payload || (timestamp_ascii if timestamp>0) || transfer_address`.
pub fn dev_bytes(payload: &[u8], timestamp: i64, transfer_address: &str) -> Vec<u8> {
    let mut out = payload.to_vec();
    if timestamp > 0 {
        out.extend_from_slice(timestamp.to_string().as_bytes());
    }
    out.extend_from_slice(transfer_address.as_bytes());
    out
}

/// `transfer_bytes = dev_bytes || executor_address`.
pub fn transfer_bytes(payload: &[u8], timestamp: i64, transfer_address: &str, executor_address: &str) -> Vec<u8> {
    let mut out = dev_bytes(payload, timestamp, transfer_address);
    out.extend_from_slice(executor_address.as_bytes());
    out
}

/// `executor_bytes = transfer_bytes` (spec §4.9 — identical construction,
/// kept as a distinct function so call sites read by role, not by reuse).
pub fn executor_bytes(payload: &[u8], timestamp: i64, transfer_address: &str, executor_address: &str) -> Vec<u8> {
    transfer_bytes(payload, timestamp, transfer_address, executor_address)
}

/// The byte string a given role actually signs.
pub fn payload_bytes_for_role(
    role: SignerRole,
    payload: &[u8],
    timestamp: i64,
    transfer_address: &str,
    executor_address: &str,
) -> Vec<u8> {
    match role {
        SignerRole::Developer => dev_bytes(payload, timestamp, transfer_address),
        SignerRole::TransferAgent => transfer_bytes(payload, timestamp, transfer_address, executor_address),
        SignerRole::ExecutorAgent => executor_bytes(payload, timestamp, transfer_address, executor_address),
    }
}

/// Timestamp policing (spec §4.9): `requestOffset = current - signatureTimestamp`;
/// reject if it is too old (`> expiration + slack`) or too far in the
/// future (`< -(advance + slack)`).
pub fn check_timestamp(current: i64, signature_timestamp: i64, params: &Params) -> Result<(), AuthError> {
    let offset = current - signature_timestamp;
    let too_old_bound = params.expiration_seconds + params.slack_seconds;
    let too_future_bound = params.advance_seconds + params.slack_seconds;

    if offset > too_old_bound {
        return Err(AuthError::TimestampTooOld { offset, bound: too_old_bound });
    }
    if offset < -too_future_bound {
        return Err(AuthError::TimestampTooFuture { offset, bound: too_future_bound });
    }
    Ok(())
}
