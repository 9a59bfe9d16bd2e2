use serde::{Deserialize, Serialize};

/// Governance-modifiable parameters for the inference payment engine (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Price used when no oracle quote is available at all (spec §9,
    /// open question 1: "if no oracle value is available at all the
    /// fallback 1000 is recorded").
    pub legacy_fallback_price: u64,

    /// Ceiling `tokens * price` must not exceed (spec §5).
    pub max_cost: i64,
}

impl Default for Params {
    fn default() -> Self {
        Self { legacy_fallback_price: 1000, max_cost: i64::MAX / 2 }
    }
}
