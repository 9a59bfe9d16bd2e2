use shared_types::{CoreError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{role} signature verification failed")]
    SignatureInvalid { role: &'static str },

    #[error("signature timestamp too old: offset {offset}s exceeds bound {bound}s")]
    TimestampTooOld { offset: i64, bound: i64 },

    #[error("signature timestamp too far in the future: offset {offset}s exceeds bound {bound}s")]
    TimestampTooFuture { offset: i64, bound: i64 },

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("grantee already registered for {0}")]
    GranteeExists(String),

    #[error("grantee not found for {0}")]
    GranteeNotFound(String),

    #[error("store error: {0}")]
    Store(#[from] chain_store::StoreError),

    #[error("crypto error: {0}")]
    Crypto(#[from] shared_crypto::CryptoError),
}

impl CoreError for AuthError {
    fn kind(&self) -> ErrorKind {
        match self {
            AuthError::SignatureInvalid { .. } => ErrorKind::Forbidden,
            AuthError::TimestampTooOld { .. } => ErrorKind::Forbidden,
            AuthError::TimestampTooFuture { .. } => ErrorKind::Forbidden,
            AuthError::InvalidPublicKey(_) => ErrorKind::InvalidInput,
            AuthError::GranteeExists(_) => ErrorKind::Conflict,
            AuthError::GranteeNotFound(_) => ErrorKind::NotFound,
            AuthError::Store(_) => ErrorKind::InvalidInput,
            AuthError::Crypto(_) => ErrorKind::InvalidInput,
        }
    }
}
