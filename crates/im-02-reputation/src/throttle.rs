//! Invalidation throttling law (§4.3).
//!
//! `invalidations = max(1, floor(M * W * (R/100) * tanh(I/C)))`, computed
//! entirely in [`shared_decimal::Decimal`] so the `tanh` truncation point
//! is identical across replicas (spec §9).

use shared_decimal::{taylor, Decimal};

use crate::params::Params;

/// `I`=inferences processed this sample period, `W`=participant weight in
/// `[0,1]`, `R`=reputation `0..=100`. Returns a value clamped to
/// `[1, InvalidationsLimit]`; degenerate curve/limit parameters (`C <= 0`
/// or `M <= 0`) short-circuit to `1` (spec §4.3).
pub fn calculate_invalidations(inferences_processed: u64, weight: &Decimal, reputation: u8, params: &Params) -> i64 {
    let m = params.invalidations_limit;
    let c = &params.invalidations_limit_curve;

    if m <= 0 || c.cmp_value(&Decimal::zero()) != std::cmp::Ordering::Greater {
        return 1;
    }

    let x = Decimal::from_u64(inferences_processed)
        .checked_div(c)
        .unwrap_or_else(|_| Decimal::zero());
    let tanh_x = taylor::tanh(&x);

    let reputation_fraction = Decimal::from_u64(reputation as u64)
        .checked_div(&Decimal::from_i64(100))
        .unwrap_or_else(|_| Decimal::zero());

    let raw = Decimal::from_i64(m)
        .checked_mul(weight)
        .checked_mul(&reputation_fraction)
        .checked_mul(&tanh_x);

    raw.floor_to_i64().max(1).min(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Params {
        Params { invalidations_limit: 1000, invalidations_limit_curve: Decimal::from_i64(500), ..Params::default() }
    }

    /// Scenario S4 (spec §8): I=10000, W=1.0, R=100, M=1000, C=500 -> [950,1000].
    #[test]
    fn scenario_s4_invalidation_tanh() {
        let w = Decimal::one();
        let result = calculate_invalidations(10_000, &w, 100, &params());
        assert!((950..=1000).contains(&result), "got {result}");
    }

    #[test]
    fn zero_or_negative_curve_returns_one() {
        let p = Params { invalidations_limit_curve: Decimal::zero(), ..params() };
        assert_eq!(calculate_invalidations(10_000, &Decimal::one(), 100, &p), 1);
    }

    #[test]
    fn non_positive_limit_returns_one() {
        let p = Params { invalidations_limit: 0, ..params() };
        assert_eq!(calculate_invalidations(10_000, &Decimal::one(), 100, &p), 1);
    }

    #[test]
    fn never_below_one() {
        let result = calculate_invalidations(0, &Decimal::zero(), 0, &params());
        assert_eq!(result, 1);
    }

    #[test]
    fn never_exceeds_limit() {
        let result = calculate_invalidations(1_000_000, &Decimal::one(), 100, &params());
        assert!(result <= params().invalidations_limit);
    }

    #[test]
    fn monotone_non_decreasing_in_inferences_processed() {
        let p = params();
        let w = Decimal::one();
        let mut prev = 0i64;
        for i in [0, 10, 100, 1_000, 5_000, 10_000, 50_000] {
            let cur = calculate_invalidations(i, &w, 100, &p);
            assert!(cur >= prev, "regressed at I={i}");
            prev = cur;
        }
    }

    #[test]
    fn monotone_non_decreasing_in_weight() {
        let p = params();
        let mut prev = 0i64;
        for w in ["0.0", "0.1", "0.5", "0.9", "1.0"] {
            let cur = calculate_invalidations(5_000, &Decimal::parse(w).unwrap(), 100, &p);
            assert!(cur >= prev, "regressed at W={w}");
            prev = cur;
        }
    }

    #[test]
    fn monotone_non_decreasing_in_reputation() {
        let p = params();
        let w = Decimal::one();
        let mut prev = 0i64;
        for r in [0u8, 10, 50, 90, 100] {
            let cur = calculate_invalidations(5_000, &w, r, &p);
            assert!(cur >= prev, "regressed at R={r}");
            prev = cur;
        }
    }
}
