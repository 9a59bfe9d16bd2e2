use serde::{Deserialize, Serialize};

/// Governance-modifiable parameters for signature timestamp policing
/// (spec §4.9: "Both bounds default to 10 seconds if unset").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// How far in the past a signature timestamp may be before it is "too old".
    pub expiration_seconds: i64,
    /// How far in the future a signature timestamp may be before it is "too future".
    pub advance_seconds: i64,
    /// Extra tolerance added to both bounds to absorb block-time/wall-clock
    /// skew between the signer and the block that includes the message.
    pub slack_seconds: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self { expiration_seconds: 10, advance_seconds: 10, slack_seconds: 2 }
    }
}
