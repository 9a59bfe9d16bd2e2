//! Pure calculations for the inference payment engine (spec §4.1).
//!
//! Nothing here touches the store or the bank; `keeper` wires these
//! functions to both.

use shared_types::Address;

/// `StartInference` message fields (spec §4.1).
#[derive(Debug, Clone)]
pub struct StartInferenceMsg {
    pub inference_id: String,
    pub model: String,
    pub prompt_hash: [u8; 32],
    pub prompt_tokens: u64,
    pub max_tokens: u64,
    pub requested_by: Address,
    pub assigned_to: Address,
    pub developer_signature: Option<String>,
}

/// `FinishInference` message fields (spec §4.1).
#[derive(Debug, Clone)]
pub struct FinishInferenceMsg {
    pub inference_id: String,
    pub response_hash: [u8; 32],
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub executed_by: Address,
    pub executor_signature: Option<String>,
}

/// `escrow = (max_tokens + prompt_tokens) * per_token_price`, checked.
pub fn escrow_amount(
    max_tokens: u64,
    prompt_tokens: u64,
    per_token_price: u64,
    max_cost: i64,
) -> Result<i64, shared_types::CoinError> {
    let tokens = max_tokens
        .checked_add(prompt_tokens)
        .ok_or(shared_types::CoinError::Overflow { lhs: max_tokens as i64, op: "+", rhs: prompt_tokens as i64 })?;
    shared_types::checked_cost(tokens, per_token_price, max_cost)
}

/// `actual_cost = (prompt_tokens + completion_tokens) * per_token_price`, checked.
pub fn actual_cost(
    prompt_tokens: u64,
    completion_tokens: u64,
    per_token_price: u64,
    max_cost: i64,
) -> Result<i64, shared_types::CoinError> {
    let tokens = prompt_tokens
        .checked_add(completion_tokens)
        .ok_or(shared_types::CoinError::Overflow { lhs: prompt_tokens as i64, op: "+", rhs: completion_tokens as i64 })?;
    shared_types::checked_cost(tokens, per_token_price, max_cost)
}

/// `(amount_to_pay, refund)` given the escrow already held and the realised
/// cost (spec §4.1 case 3).
pub fn settle(escrow: i64, cost: i64) -> (i64, i64) {
    let amount_to_pay = cost.min(escrow);
    let refund = escrow - amount_to_pay;
    (amount_to_pay, refund)
}

/// Reconcile `finish.prompt_tokens` against the value already on record
/// (spec §9, open question 2: a `0` on Finish means "not reported",
/// preserve the existing value instead of overwriting).
pub fn reconcile_prompt_tokens(existing: u64, finish_reported: u64) -> u64 {
    if finish_reported == 0 {
        existing
    } else {
        finish_reported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_pays_min_of_cost_and_escrow() {
        assert_eq!(settle(110_000, 30_000), (30_000, 80_000));
    }

    #[test]
    fn settle_caps_payment_at_escrow_when_cost_exceeds_it() {
        assert_eq!(settle(1_000, 5_000), (1_000, 0));
    }

    #[test]
    fn reconcile_prompt_tokens_prefers_finish_unless_zero() {
        assert_eq!(reconcile_prompt_tokens(10, 12), 12);
        assert_eq!(reconcile_prompt_tokens(10, 0), 10);
    }

    #[test]
    fn escrow_amount_matches_scenario_s1() {
        assert_eq!(escrow_amount(100, 10, 1000, i64::MAX).unwrap(), 110_000);
    }

    #[test]
    fn actual_cost_matches_scenario_s1() {
        assert_eq!(actual_cost(10, 20, 1000, i64::MAX).unwrap(), 30_000);
    }
}
