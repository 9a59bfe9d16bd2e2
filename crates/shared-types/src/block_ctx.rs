//! The block-level context the host consensus layer provides to every
//! handler (spec §1: "a block context with monotonic height and timestamp").
//!
//! Nothing in the core reads wall-clock time directly (spec §5); every
//! time-driven decision goes through this struct.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    pub height: u64,
    pub timestamp: u64,
    pub chain_id: u64,
}

impl BlockContext {
    pub fn new(height: u64, timestamp: u64, chain_id: u64) -> Self {
        Self { height, timestamp, chain_id }
    }

    #[cfg(test)]
    pub fn for_test(height: u64) -> Self {
        Self { height, timestamp: height * 5, chain_id: 1 }
    }
}
