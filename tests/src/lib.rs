//! # Chain Keeper Integration Tests
//!
//! Cross-module flows that exercise `chain-keeper::Keeper` the way a
//! host embedding it would: one store, one block context per step,
//! messages applied in sequence, hooks run at block and epoch
//! boundaries.
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs   # spec scenarios S1-S8, end to end
//!     └── properties.rs  # the eight cross-module invariants
//! ```

pub mod integration;
