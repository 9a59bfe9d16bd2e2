use shared_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DkgError {
    #[error("no DKG epoch found for id {0}")]
    EpochNotFound(u64),

    #[error("no DKG epoch is currently active")]
    NoActiveEpoch,

    #[error("epoch {epoch_id} is in phase {phase:?}, cannot accept {action} submissions")]
    WrongPhase { epoch_id: u64, phase: shared_types::DkgPhase, action: &'static str },

    #[error("dealer index {0} is out of range for this epoch's participant set")]
    DealerIndexOutOfRange(u32),

    #[error("verifier index {0} is out of range for this epoch's participant set")]
    VerifierIndexOutOfRange(u32),

    #[error("commitment vector must have at least one entry")]
    EmptyCommitments,

    #[error("dealer validity vector length {got} does not match participant count {expected}")]
    DealerValidityLengthMismatch { got: usize, expected: usize },

    #[error("crypto error: {0}")]
    Crypto(#[from] shared_crypto::CryptoError),

    #[error("store error: {0}")]
    Store(#[from] chain_store::StoreError),
}

impl CoreError for DkgError {
    fn kind(&self) -> ErrorKind {
        match self {
            DkgError::EpochNotFound(_) => ErrorKind::NotFound,
            DkgError::NoActiveEpoch => ErrorKind::NotFound,
            DkgError::WrongPhase { .. } => ErrorKind::Conflict,
            DkgError::DealerIndexOutOfRange(_) => ErrorKind::InvalidInput,
            DkgError::VerifierIndexOutOfRange(_) => ErrorKind::InvalidInput,
            DkgError::EmptyCommitments => ErrorKind::InvalidInput,
            DkgError::DealerValidityLengthMismatch { .. } => ErrorKind::InvalidInput,
            DkgError::Crypto(_) => ErrorKind::InvalidInput,
            DkgError::Store(_) => ErrorKind::InvalidInput,
        }
    }
}
