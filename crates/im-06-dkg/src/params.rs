//! Governance parameters for C7 (spec §4.7, §6).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Blocks granted for the VERIFYING phase once DEALING closes
    /// (`VerificationPhaseDurationBlocks`).
    pub verification_phase_duration_blocks: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self { verification_phase_duration_blocks: 100 }
    }
}
