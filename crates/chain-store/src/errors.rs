use thiserror::Error;

/// Errors raised by a [`crate::KvStore`] adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(String),

    #[error("failed to decode value at key {key:?}: {message}")]
    Decode { key: Vec<u8>, message: String },

    #[error("failed to encode value: {0}")]
    Encode(String),
}
