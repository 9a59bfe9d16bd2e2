//! The outbound port the module keepers are written against.
//!
//! One abstract ordered key-value store backs every module's state — no
//! module crate talks to RocksDB or a HashMap directly. `prefix_scan` must
//! return entries in ascending key order: several invariants (the FIFO
//! unbonding queue, data-model invariant 4) depend on lexicographic byte
//! order matching intended iteration order, which a `HashMap`-backed
//! adapter cannot guarantee.

use crate::errors::StoreError;

/// A single mutation queued for an atomic batch write.
#[derive(Debug, Clone)]
pub enum BatchOp {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl BatchOp {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOp::Put { key: key.into(), value: value.into() }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOp::Delete { key: key.into() }
    }
}

/// Abstract ordered key-value store.
///
/// Production: [`crate::rocksdb_store::RocksDbStore`].
/// Testing: [`crate::memory_store::InMemoryStore`].
pub trait KvStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    fn delete(&mut self, key: &[u8]) -> Result<(), StoreError>;

    fn exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Apply every operation in `ops`, or none of them.
    fn atomic_batch_write(&mut self, ops: Vec<BatchOp>) -> Result<(), StoreError>;

    /// Entries whose key starts with `prefix`, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;

    /// Entries with `lo <= key < hi`, in ascending key order.
    fn range_scan(&self, lo: &[u8], hi: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;
}

/// Typed convenience helpers layered over [`KvStore`] via JSON encoding.
///
/// Every module record (`Participant`, `Inference`, ...) is `Serialize` +
/// `Deserialize`; keepers read and write through these helpers instead of
/// hand-rolling `serde_json::to_vec` at every call site.
pub trait TypedStore: KvStore {
    fn get_json<T: serde::de::DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, StoreError> {
        match self.get(key)? {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| StoreError::Decode { key: key.to_vec(), message: e.to_string() }),
        }
    }

    fn put_json<T: serde::Serialize>(&mut self, key: &[u8], value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.put(key, &bytes)
    }

    fn prefix_scan_json<T: serde::de::DeserializeOwned>(
        &self,
        prefix: &[u8],
    ) -> Result<Vec<(Vec<u8>, T)>, StoreError> {
        self.prefix_scan(prefix)?
            .into_iter()
            .map(|(k, v)| {
                let decoded = serde_json::from_slice(&v)
                    .map_err(|e| StoreError::Decode { key: k.clone(), message: e.to_string() })?;
                Ok((k, decoded))
            })
            .collect()
    }

    /// As [`Self::prefix_scan_json`], but over a `[lo, hi)` range (used by
    /// the unbonding queue to scan only entries due up to the current epoch).
    fn range_scan_json<T: serde::de::DeserializeOwned>(
        &self,
        lo: &[u8],
        hi: &[u8],
    ) -> Result<Vec<(Vec<u8>, T)>, StoreError> {
        self.range_scan(lo, hi)?
            .into_iter()
            .map(|(k, v)| {
                let decoded = serde_json::from_slice(&v)
                    .map_err(|e| StoreError::Decode { key: k.clone(), message: e.to_string() })?;
                Ok((k, decoded))
            })
            .collect()
    }
}

impl<S: KvStore + ?Sized> TypedStore for S {}
