//! Pure gate logic for the bootstrap transfer restriction (spec §4.10).
//!
//! Nothing here touches the store; `keeper` loads the restriction record,
//! the candidate exemptions, and the usage counter, then calls into these
//! functions to decide allow/reject.

use shared_types::{EmergencyExemption, ExemptionUsage, TransferRestriction};

use crate::errors::RestrictionError;

/// First exemption (in the order given — callers pass them in ascending
/// store-key order for determinism, spec §5) matching `(from, to)`.
pub fn find_matching_exemption<'a>(
    exemptions: &'a [EmergencyExemption],
    from: &str,
    to: &str,
) -> Option<&'a EmergencyExemption> {
    exemptions.iter().find(|e| e.matches(from, to))
}

/// Validates a candidate exemption against the transfer's amount, the
/// current block, and the spending account's usage so far (spec §4.10).
pub fn validate_exemption(
    exemption: &EmergencyExemption,
    usage: &ExemptionUsage,
    amount: i64,
    current_block: u64,
) -> Result<(), RestrictionError> {
    if amount > exemption.max_amount {
        return Err(RestrictionError::AmountExceedsExemption {
            exemption_id: exemption.exemption_id.clone(),
            amount,
            max_amount: exemption.max_amount,
        });
    }
    if current_block >= exemption.expiry_block {
        return Err(RestrictionError::ExemptionExpired {
            exemption_id: exemption.exemption_id.clone(),
            expiry_block: exemption.expiry_block,
            current_block,
        });
    }
    if usage.count >= exemption.usage_limit {
        return Err(RestrictionError::ExemptionUsesExhausted {
            exemption_id: exemption.exemption_id.clone(),
            account: usage.account.clone(),
        });
    }
    Ok(())
}

/// Whether the restriction should be reported as lifted for the first time
/// at this block (spec §4.10: "emit `EventRestrictionLifted` once").
pub fn just_lifted(restriction: &TransferRestriction, current_block: u64) -> bool {
    restriction.restriction_end_block > 0
        && current_block >= restriction.restriction_end_block
        && !restriction.lifted_event_emitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exemption(id: &str, from: Option<&str>, to: Option<&str>) -> EmergencyExemption {
        EmergencyExemption {
            exemption_id: id.to_string(),
            from_address: from.map(str::to_string),
            to_address: to.map(str::to_string),
            max_amount: 1_000,
            usage_limit: 3,
            expiry_block: 100,
            justification: "test".into(),
        }
    }

    #[test]
    fn wildcard_from_matches_any_sender() {
        let e = exemption("e1", None, Some("treasury"));
        assert!(find_matching_exemption(&[e], "alice", "treasury").is_some());
    }

    #[test]
    fn non_matching_to_address_is_skipped() {
        let e = exemption("e1", None, Some("treasury"));
        assert!(find_matching_exemption(&[e], "alice", "elsewhere").is_none());
    }

    #[test]
    fn first_match_wins_in_given_order() {
        let e1 = exemption("e1", Some("alice"), None);
        let e2 = exemption("e2", None, None);
        let found = find_matching_exemption(&[e1, e2], "alice", "bob").unwrap();
        assert_eq!(found.exemption_id, "e1");
    }

    #[test]
    fn amount_over_max_is_rejected() {
        let e = exemption("e1", None, None);
        let usage = ExemptionUsage { exemption_id: "e1".into(), account: "alice".into(), count: 0 };
        let err = validate_exemption(&e, &usage, 2_000, 10).unwrap_err();
        assert!(matches!(err, RestrictionError::AmountExceedsExemption { .. }));
    }

    #[test]
    fn expired_exemption_is_rejected() {
        let e = exemption("e1", None, None);
        let usage = ExemptionUsage { exemption_id: "e1".into(), account: "alice".into(), count: 0 };
        let err = validate_exemption(&e, &usage, 10, 100).unwrap_err();
        assert!(matches!(err, RestrictionError::ExemptionExpired { .. }));
    }

    #[test]
    fn exhausted_usage_is_rejected() {
        let e = exemption("e1", None, None);
        let usage = ExemptionUsage { exemption_id: "e1".into(), account: "alice".into(), count: 3 };
        let err = validate_exemption(&e, &usage, 10, 10).unwrap_err();
        assert!(matches!(err, RestrictionError::ExemptionUsesExhausted { .. }));
    }

    #[test]
    fn restriction_lifted_exactly_once() {
        let r = TransferRestriction { restriction_end_block: 100, lifted_event_emitted: false };
        assert!(just_lifted(&r, 100));
        let r2 = TransferRestriction { restriction_end_block: 100, lifted_event_emitted: true };
        assert!(!just_lifted(&r2, 100));
    }
}
