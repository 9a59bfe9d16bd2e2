use shared_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollateralError {
    #[error("invalid address {0}: {1}")]
    InvalidAddress(String, String),

    #[error("invalid denomination: {0}")]
    InvalidDenom(String),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("{participant} has insufficient collateral: has {have}, needs {need}")]
    InsufficientCollateral { participant: String, have: i64, need: i64 },

    #[error("no collateral account found for {0}")]
    NoCollateralFound(String),

    #[error("no unbonding entries are due for participant {0} at epoch {1}")]
    LatestEpochNotFound(String, u64),

    #[error("slash fraction must be in [0, 1], got {0}")]
    InvalidSlashFraction(String),

    #[error("{0} is not jailed")]
    NotJailed(String),

    #[error("jail period for {participant} has not elapsed: unjail eligible at epoch {eligible_epoch}, current is {current_epoch}")]
    JailPeriodNotElapsed { participant: String, eligible_epoch: u64, current_epoch: u64 },

    #[error("bank error: {0}")]
    Bank(String),

    #[error("store error: {0}")]
    Store(#[from] chain_store::StoreError),
}

impl CoreError for CollateralError {
    fn kind(&self) -> ErrorKind {
        match self {
            CollateralError::InvalidAddress(..) => ErrorKind::InvalidInput,
            CollateralError::InvalidDenom(_) => ErrorKind::InvalidInput,
            CollateralError::NonPositiveAmount(_) => ErrorKind::InvalidInput,
            CollateralError::InsufficientCollateral { .. } => ErrorKind::InvalidInput,
            CollateralError::NoCollateralFound(_) => ErrorKind::NotFound,
            CollateralError::LatestEpochNotFound(..) => ErrorKind::NotFound,
            CollateralError::InvalidSlashFraction(_) => ErrorKind::InvalidInput,
            CollateralError::NotJailed(_) => ErrorKind::Conflict,
            CollateralError::JailPeriodNotElapsed { .. } => ErrorKind::Forbidden,
            CollateralError::Bank(_) => ErrorKind::InvalidInput,
            CollateralError::Store(_) => ErrorKind::InvalidInput,
        }
    }
}
