use serde::{Deserialize, Serialize};

/// Governance-modifiable parameters for the bootstrap transfer lock (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// `0` disables the restriction entirely (spec §6: "0 = disabled").
    pub restriction_end_block: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self { restriction_end_block: 0 }
    }
}
