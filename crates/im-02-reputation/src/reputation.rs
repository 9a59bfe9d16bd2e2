//! Reputation scoring (§4.2, first half).
//!
//! `CalculateReputation` folds a participant's per-epoch miss-fraction
//! history into a penalty accumulator, then maps the resulting effective
//! epoch count onto `[0, 100]`.

use shared_decimal::Decimal;

use crate::params::Params;

/// `E`=epochs completed, `miss_fractions`=per-epoch miss fraction history
/// (oldest first, each in `[0,1]`). Returns a bounded `0..=100` integer.
pub fn calculate_reputation(epochs_completed: u64, miss_fractions: &[Decimal], params: &Params) -> u8 {
    let etm = Decimal::from_u64(params.epochs_to_max);

    let mut penalty = Decimal::zero();
    for miss in miss_fractions {
        if miss.cmp_value(&params.miss_percentage_cutoff) == std::cmp::Ordering::Greater {
            let term = miss.checked_div(&etm).unwrap_or_else(|_| Decimal::zero());
            penalty = penalty.checked_add(&term).checked_mul(&params.miss_requests_penalty);
        }
    }
    penalty = penalty.checked_mul(&etm);

    let effective_epochs = Decimal::from_u64(epochs_completed).checked_sub(&penalty);

    if effective_epochs.cmp_value(&etm) == std::cmp::Ordering::Greater {
        return 100;
    }
    if effective_epochs.cmp_value(&Decimal::zero()) != std::cmp::Ordering::Greater {
        return 0;
    }

    let ratio = effective_epochs
        .checked_div(&etm)
        .unwrap_or_else(|_| Decimal::zero())
        .truncate_two_decimal();
    let scaled = ratio.checked_mul(&Decimal::from_i64(100));
    scaled.floor_to_i64().clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Params {
        Params {
            epochs_to_max: 100,
            miss_percentage_cutoff: Decimal::parse("0.10").unwrap(),
            miss_requests_penalty: Decimal::parse("3.0").unwrap(),
            ..Params::default()
        }
    }

    #[test]
    fn perfect_history_caps_at_one_hundred() {
        let r = calculate_reputation(150, &[], &params());
        assert_eq!(r, 100);
    }

    #[test]
    fn zero_epochs_is_zero_reputation() {
        let r = calculate_reputation(0, &[], &params());
        assert_eq!(r, 0);
    }

    #[test]
    fn reputation_is_monotone_non_decreasing_in_epoch_count() {
        let p = params();
        let misses: Vec<Decimal> = Vec::new();
        let mut prev = 0u8;
        for e in [0, 10, 20, 50, 80, 99, 100, 120] {
            let r = calculate_reputation(e, &misses, &p);
            assert!(r >= prev, "reputation regressed at epochs={e}");
            prev = r;
        }
    }

    #[test]
    fn a_large_miss_fraction_reduces_reputation_below_unpenalised() {
        let p = params();
        let clean = calculate_reputation(50, &[], &p);
        let with_misses = calculate_reputation(50, &[Decimal::parse("0.5").unwrap()], &p);
        assert!(with_misses < clean);
    }

    #[test]
    fn penalty_accumulates_additively_across_qualifying_misses() {
        // ETM=100, MRP=3.0, two qualifying misses of 0.5 each:
        // penalty = ((0 + 0.5/100)*3 + 0.5/100)*3 * 100 = 6.0, not 451.5.
        let p = params();
        let misses = vec![Decimal::parse("0.5").unwrap(), Decimal::parse("0.5").unwrap()];
        let r = calculate_reputation(100, &misses, &p);
        // effective_epochs = 100 - 6.0 = 94.0 -> floor(94/100 * 100) = 94
        assert_eq!(r, 94);
    }

    #[test]
    fn miss_fraction_at_or_below_cutoff_is_not_penalised() {
        let p = params();
        let clean = calculate_reputation(50, &[], &p);
        let at_cutoff = calculate_reputation(50, &[p.miss_percentage_cutoff.clone()], &p);
        assert_eq!(clean, at_cutoff);
    }
}
