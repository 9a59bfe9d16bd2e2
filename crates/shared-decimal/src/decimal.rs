//! Deterministic arbitrary-precision decimal type.
//!
//! Wraps [`bigdecimal::BigDecimal`] so that every replica performing the
//! same sequence of operations lands on the same `(coefficient, exponent)`
//! pair — no floating point anywhere in the probability, throttling, or
//! reputation math.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::errors::DecimalError;

/// Scale used when truncating a ratio to two decimal digits (§4.2).
pub const TWO_DECIMAL_SCALE: i64 = 2;

/// A deterministic decimal value. Cheap to clone; all operations are
/// checked and round with [`RoundingMode::Down`] unless stated otherwise,
/// matching the "exact decimal" requirement of spec §4.3 / §4.2.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decimal(#[serde(with = "decimal_serde")] BigDecimal);

mod decimal_serde {
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &BigDecimal, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BigDecimal, D::Error> {
        let raw = String::deserialize(d)?;
        BigDecimal::from_str(&raw).map_err(serde::de::Error::custom)
    }
}

impl Decimal {
    pub fn zero() -> Self {
        Self(BigDecimal::from(0))
    }

    pub fn one() -> Self {
        Self(BigDecimal::from(1))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(BigDecimal::from(value))
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigDecimal::from(value))
    }

    /// Build `numerator / denominator` as an exact decimal ratio, rounded
    /// down at `scale` fractional digits once divided.
    pub fn ratio(numerator: i64, denominator: i64, scale: i64) -> Result<Self, DecimalError> {
        if denominator == 0 {
            return Err(DecimalError::DivisionByZero);
        }
        let n = BigDecimal::from(numerator);
        let d = BigDecimal::from(denominator);
        Ok(Self((n / d).with_scale_round(scale, RoundingMode::Down)))
    }

    pub fn parse(s: &str) -> Result<Self, DecimalError> {
        BigDecimal::from_str(s)
            .map(Self)
            .map_err(|_| DecimalError::Parse(s.to_string()))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigDecimal::from(0)
    }

    pub fn checked_add(&self, other: &Self) -> Self {
        Self(&self.0 + &other.0)
    }

    pub fn checked_sub(&self, other: &Self) -> Self {
        Self(&self.0 - &other.0)
    }

    pub fn checked_mul(&self, other: &Self) -> Self {
        Self(&self.0 * &other.0)
    }

    pub fn checked_div(&self, other: &Self) -> Result<Self, DecimalError> {
        if other.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(Self(&self.0 / &other.0))
    }

    pub fn min(&self, other: &Self) -> Self {
        if self.0 <= other.0 {
            self.clone()
        } else {
            other.clone()
        }
    }

    pub fn max(&self, other: &Self) -> Self {
        if self.0 >= other.0 {
            self.clone()
        } else {
            other.clone()
        }
    }

    pub fn clamp(&self, lo: &Self, hi: &Self) -> Self {
        self.max(lo).min(hi)
    }

    /// Truncate (round toward zero) to `scale` fractional digits.
    pub fn truncate(&self, scale: i64) -> Self {
        Self(self.0.with_scale_round(scale, RoundingMode::Down))
    }

    /// Truncate to the ratio-scale used by the reputation curve (§4.2).
    pub fn truncate_two_decimal(&self) -> Self {
        self.truncate(TWO_DECIMAL_SCALE)
    }

    /// Floor to an integer, per the `⌊...⌋` notation used throughout the spec.
    pub fn floor_to_i64(&self) -> i64 {
        self.0
            .with_scale_round(0, RoundingMode::Floor)
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    pub fn cmp_value(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }

    pub fn to_f64_lossy(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_value(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_value(other)
    }
}
