//! Taylor-series `exp` and `tanh`, truncated at a fixed term count so every
//! replica converges on the identical value (spec §4.3, §9).
//!
//! Floating point is forbidden for this computation: a platform-dependent
//! `f64::exp` would diverge in its last bits across architectures. The
//! series below is pure decimal arithmetic with a fixed truncation point.

use crate::decimal::Decimal;

/// Number of Taylor terms used for `e^{2x}` (spec §4.3: "20 terms").
const TAYLOR_TERMS: u32 = 20;

/// Clamp bound for the `tanh` argument, beyond which the series would need
/// more terms to converge (spec §4.3, §9).
const TANH_CLAMP: i64 = 10;

/// `e^{2x} = Σ_{k=0..19} (2x)^k / k!`, computed in exact decimal arithmetic.
pub fn exp_2x(x: &Decimal) -> Decimal {
    let two_x = x.checked_mul(&Decimal::from_i64(2));
    let mut term = Decimal::one(); // (2x)^0 / 0!
    let mut sum = Decimal::one();
    for k in 1..TAYLOR_TERMS {
        term = term.checked_mul(&two_x);
        term = term
            .checked_div(&Decimal::from_i64(k as i64))
            .expect("k is never zero in this loop");
        sum = sum.checked_add(&term);
    }
    sum
}

/// `tanh(x) := (e^{2x} - 1) / (e^{2x} + 1)`, with `x` clamped to `[-10, 10]`
/// to keep the truncated series within its convergence radius.
pub fn tanh(x: &Decimal) -> Decimal {
    let lo = Decimal::from_i64(-TANH_CLAMP);
    let hi = Decimal::from_i64(TANH_CLAMP);
    let clamped = x.clamp(&lo, &hi);
    let e2x = exp_2x(&clamped);
    let numerator = e2x.checked_sub(&Decimal::one());
    let denominator = e2x.checked_add(&Decimal::one());
    numerator
        .checked_div(&denominator)
        .expect("e^{2x} + 1 is always positive")
}
