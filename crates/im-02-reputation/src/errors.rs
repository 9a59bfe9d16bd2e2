use shared_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReputationError {
    #[error("participant {0} not found")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("store error: {0}")]
    Store(#[from] chain_store::StoreError),
}

impl CoreError for ReputationError {
    fn kind(&self) -> ErrorKind {
        match self {
            ReputationError::NotFound(_) => ErrorKind::NotFound,
            ReputationError::InvalidInput(_) => ErrorKind::InvalidInput,
            ReputationError::Store(_) => ErrorKind::InvalidInput,
        }
    }
}
