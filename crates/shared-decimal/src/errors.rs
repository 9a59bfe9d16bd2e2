use thiserror::Error;

/// Errors raised by deterministic decimal arithmetic.
#[derive(Debug, Clone, Error)]
pub enum DecimalError {
    #[error("failed to parse decimal from {0:?}")]
    Parse(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow computing {0}")]
    Overflow(String),
}
