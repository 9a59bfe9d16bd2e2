use shared_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VestingError {
    #[error("total must be positive, got {0}")]
    NonPositiveTotal(i64),

    #[error("n_epochs must be at least 1, got {0}")]
    InvalidEpochCount(u32),

    #[error("no vesting schedule found for {0}")]
    NotFound(String),

    #[error("bank error: {0}")]
    Bank(String),

    #[error("store error: {0}")]
    Store(#[from] chain_store::StoreError),
}

impl CoreError for VestingError {
    fn kind(&self) -> ErrorKind {
        match self {
            VestingError::NonPositiveTotal(_) => ErrorKind::InvalidInput,
            VestingError::InvalidEpochCount(_) => ErrorKind::InvalidInput,
            VestingError::NotFound(_) => ErrorKind::NotFound,
            VestingError::Bank(_) => ErrorKind::InvalidInput,
            VestingError::Store(_) => ErrorKind::InvalidInput,
        }
    }
}
