use shared_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkshareError {
    #[error("cannot redistribute: both existing and new worker sets are empty")]
    NoWorkers,

    #[error("cost must be non-negative, got {0}")]
    NegativeCost(i64),

    #[error("payout error: {0}")]
    Bank(String),
}

impl CoreError for WorkshareError {
    fn kind(&self) -> ErrorKind {
        match self {
            WorkshareError::NoWorkers => ErrorKind::InvalidInput,
            WorkshareError::NegativeCost(_) => ErrorKind::InvalidInput,
            WorkshareError::Bank(_) => ErrorKind::InvalidInput,
        }
    }
}
