//! Validation-probability curve and the deterministic validation draw
//! (§4.2, second half).

use std::cmp::Ordering;

use shared_decimal::Decimal;

use crate::params::Params;

/// `min_avg(t)`: the validation-probability floor at traffic level `t`.
///
/// Flat at `MaxValidationAverage` below `MinValidationTrafficCutoff`, flat
/// at `MinValidationAverage` above `FullValidationTrafficCutoff`, and a
/// two-segment line in between meeting at the midpoint traffic value with
/// `MinValidationHalfway` as the curve's value there.
fn min_avg(traffic_basis: u64, params: &Params) -> Decimal {
    let min_cutoff = params.min_validation_traffic_cutoff;
    let full_cutoff = params.full_validation_traffic_cutoff;

    if traffic_basis <= min_cutoff {
        return params.max_validation_average.clone();
    }
    if traffic_basis >= full_cutoff {
        return params.min_validation_average.clone();
    }

    let midpoint = min_cutoff + (full_cutoff - min_cutoff) / 2;

    if traffic_basis <= midpoint {
        interpolate(
            traffic_basis,
            min_cutoff,
            midpoint,
            &params.max_validation_average,
            &params.min_validation_halfway,
        )
    } else {
        interpolate(
            traffic_basis,
            midpoint,
            full_cutoff,
            &params.min_validation_halfway,
            &params.min_validation_average,
        )
    }
}

/// Linear interpolation of `t` within `[lo, hi]` between `v_lo` and `v_hi`,
/// using exact decimal ratios throughout.
fn interpolate(t: u64, lo: u64, hi: u64, v_lo: &Decimal, v_hi: &Decimal) -> Decimal {
    if hi <= lo {
        return v_lo.clone();
    }
    let span = Decimal::from_u64(hi - lo);
    let offset = Decimal::from_u64(t - lo);
    let frac = offset.checked_div(&span).unwrap_or_else(|_| Decimal::zero());
    let delta = v_hi.checked_sub(v_lo);
    v_lo.checked_add(&frac.checked_mul(&delta))
}

/// `p = min(1, target * validator_power / (total_power - executor_power))`.
pub fn validation_probability(
    executor_reputation: u8,
    traffic_basis: u64,
    validator_power: u64,
    executor_power: u64,
    total_power: u64,
    params: &Params,
) -> Decimal {
    let floor = min_avg(traffic_basis, params);
    let ceiling = &params.max_validation_average;
    let reputation_fraction = Decimal::from_u64(executor_reputation as u64)
        .checked_div(&Decimal::from_i64(100))
        .unwrap_or_else(|_| Decimal::zero());
    let headroom = ceiling.checked_sub(&floor);
    let target = floor.checked_add(&headroom.checked_mul(&Decimal::one().checked_sub(&reputation_fraction)));

    let denominator = total_power.saturating_sub(executor_power);
    if denominator == 0 {
        return Decimal::zero();
    }

    let scaled = target
        .checked_mul(&Decimal::from_u64(validator_power))
        .checked_div(&Decimal::from_u64(denominator))
        .unwrap_or_else(|_| Decimal::zero());

    scaled.min(&Decimal::one())
}

/// `r = SHA-256(seed || ":" || inference_id)[0..8]` as an exact fraction of
/// `2^64`, compared against `p` without ever materialising a float — the
/// core forbids floating point in consensus-relevant math (spec §5).
pub fn should_validate(seed: &str, inference_id: &str, probability: &Decimal) -> bool {
    let numerator = shared_crypto::draw::deterministic_numerator(seed, inference_id);
    let denominator = Decimal::from_u64(u64::MAX).checked_add(&Decimal::one());
    let r = Decimal::from_u64(numerator)
        .checked_div(&denominator)
        .unwrap_or_else(|_| Decimal::zero());
    r.cmp_value(probability) == Ordering::Less
}
