use shared_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference {0} not found")]
    NotFound(String),

    #[error("inference {0} already started")]
    IdExists(String),

    #[error("inference {0} already finished")]
    AlreadyFinished(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("escrow account error: {0}")]
    Bank(String),

    #[error("store error: {0}")]
    Store(#[from] chain_store::StoreError),
}

impl CoreError for InferenceError {
    fn kind(&self) -> ErrorKind {
        match self {
            InferenceError::NotFound(_) => ErrorKind::NotFound,
            InferenceError::IdExists(_) => ErrorKind::Conflict,
            InferenceError::AlreadyFinished(_) => ErrorKind::Conflict,
            InferenceError::InvalidInput(_) => ErrorKind::InvalidInput,
            InferenceError::Bank(_) => ErrorKind::InvalidInput,
            InferenceError::Store(_) => ErrorKind::InvalidInput,
        }
    }
}
