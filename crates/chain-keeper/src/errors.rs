//! Top-level error aggregation (spec §7), mirroring the way the teacher's
//! `node-runtime` wiring layer surfaces each subsystem's own error type to
//! its handlers via `#[from]`.

use shared_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Inference(#[from] im_01_inference::InferenceError),

    #[error(transparent)]
    Reputation(#[from] im_02_reputation::ReputationError),

    #[error(transparent)]
    Workshare(#[from] im_03_workshare::WorkshareError),

    #[error(transparent)]
    Collateral(#[from] im_04_collateral::CollateralError),

    #[error(transparent)]
    Vesting(#[from] im_05_vesting::VestingError),

    #[error(transparent)]
    Dkg(#[from] im_06_dkg::DkgError),

    #[error(transparent)]
    Auth(#[from] im_07_auth::AuthError),

    #[error(transparent)]
    Restriction(#[from] im_08_restrictions::RestrictionError),

    /// A message referenced coins that don't exist under the unified
    /// ledger bank (`chain_keeper::bank::LedgerBank`), surfaced as its own
    /// variant because the bank crosses module boundaries and has no
    /// single owning module error type.
    #[error("bank error: {0}")]
    Bank(String),

    /// Spec §7 "fatal" kind: the block-apply loop never returns this to a
    /// caller. [`crate::keeper::Keeper`] calls [`shared_types::fatal`]
    /// directly wherever an invariant check would otherwise produce it —
    /// this variant exists only so `AppError`'s taxonomy names all four
    /// §7 kinds plus the fatal one, matching the teacher's distinction
    /// between a recoverable `Result` and an unrecoverable `panic!`.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl CoreError for AppError {
    fn kind(&self) -> ErrorKind {
        match self {
            AppError::Inference(e) => e.kind(),
            AppError::Reputation(e) => e.kind(),
            AppError::Workshare(e) => e.kind(),
            AppError::Collateral(e) => e.kind(),
            AppError::Vesting(e) => e.kind(),
            AppError::Dkg(e) => e.kind(),
            AppError::Auth(e) => e.kind(),
            AppError::Restriction(e) => e.kind(),
            AppError::Bank(_) => ErrorKind::InvalidInput,
            AppError::Invariant(_) => ErrorKind::InvalidInput,
        }
    }
}
