use shared_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestrictionError {
    #[error("transfer of {amount} from {from} to {to} is restricted until block {restriction_end_block}")]
    TransferRestricted { from: String, to: String, amount: i64, restriction_end_block: u64 },

    #[error("exemption {0} does not cover transfer from {1} to {2}")]
    NoMatchingExemption(String, String, String),

    #[error("exemption {exemption_id} amount {amount} exceeds max {max_amount}")]
    AmountExceedsExemption { exemption_id: String, amount: i64, max_amount: i64 },

    #[error("exemption {exemption_id} expired at block {expiry_block}, current block {current_block}")]
    ExemptionExpired { exemption_id: String, expiry_block: u64, current_block: u64 },

    #[error("exemption {exemption_id} has no remaining uses for {account}")]
    ExemptionUsesExhausted { exemption_id: String, account: String },

    #[error("exemption {0} not found")]
    ExemptionNotFound(String),

    #[error("exemption {0} already exists")]
    ExemptionExists(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("store error: {0}")]
    Store(#[from] chain_store::StoreError),
}

impl CoreError for RestrictionError {
    fn kind(&self) -> ErrorKind {
        match self {
            RestrictionError::TransferRestricted { .. } => ErrorKind::Forbidden,
            RestrictionError::NoMatchingExemption(..) => ErrorKind::Forbidden,
            RestrictionError::AmountExceedsExemption { .. } => ErrorKind::Forbidden,
            RestrictionError::ExemptionExpired { .. } => ErrorKind::Forbidden,
            RestrictionError::ExemptionUsesExhausted { .. } => ErrorKind::Forbidden,
            RestrictionError::ExemptionNotFound(_) => ErrorKind::NotFound,
            RestrictionError::ExemptionExists(_) => ErrorKind::Conflict,
            RestrictionError::InvalidInput(_) => ErrorKind::InvalidInput,
            RestrictionError::Store(_) => ErrorKind::InvalidInput,
        }
    }
}
