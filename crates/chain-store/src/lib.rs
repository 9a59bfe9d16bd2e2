//! # Chain Store
//!
//! The ordered key-value store port every module keeper is written
//! against, plus the two adapters that implement it: an in-memory store
//! for tests and a RocksDB-backed store for the running node.
//!
//! Module crates depend only on [`KvStore`]/[`TypedStore`]; they never
//! import `rocksdb` directly, so unit tests run entirely in memory.

pub mod errors;
pub mod memory_store;
pub mod port;
pub mod rocksdb_store;

pub use errors::StoreError;
pub use memory_store::InMemoryStore;
pub use port::{BatchOp, KvStore, TypedStore};
pub use rocksdb_store::RocksDbStore;
