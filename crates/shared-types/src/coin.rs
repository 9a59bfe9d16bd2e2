//! Coin arithmetic.
//!
//! Amounts are signed 64-bit so that refunds and slashes can be expressed
//! as deltas without a separate sign field; stored balances are always
//! asserted non-negative by the owning module. All arithmetic here is
//! checked — spec §5 requires that `tokens * price` and friends reject
//! rather than wrap on overflow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A coin amount paired with its denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coin {
    pub denom: DenomId,
    pub amount: i64,
}

/// The single denomination this core transacts in. A real deployment may
/// support more, but every module here validates against exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DenomId(pub &'static str);

pub const BASE_DENOM: DenomId = DenomId("ngonka");

#[derive(Debug, Clone, Error)]
pub enum CoinError {
    #[error("invalid denomination: expected {expected}, got {actual}")]
    InvalidDenom { expected: String, actual: String },

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("arithmetic overflow: {lhs} {op} {rhs}")]
    Overflow { lhs: i64, op: &'static str, rhs: i64 },

    #[error("insufficient funds: have {available}, need {required}")]
    Insufficient { available: i64, required: i64 },
}

impl Coin {
    pub fn new(amount: i64, denom: DenomId) -> Self {
        Self { denom, amount }
    }

    pub fn base(amount: i64) -> Self {
        Self::new(amount, BASE_DENOM)
    }

    pub fn zero() -> Self {
        Self::base(0)
    }

    pub fn require_denom(&self, expected: DenomId) -> Result<(), CoinError> {
        if self.denom != expected {
            return Err(CoinError::InvalidDenom {
                expected: expected.0.to_string(),
                actual: self.denom.0.to_string(),
            });
        }
        Ok(())
    }

    pub fn require_positive(&self) -> Result<(), CoinError> {
        if self.amount <= 0 {
            return Err(CoinError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Coin) -> Result<Coin, CoinError> {
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(CoinError::Overflow { lhs: self.amount, op: "+", rhs: other.amount })?;
        Ok(Coin::new(amount, self.denom))
    }

    pub fn checked_sub(&self, other: &Coin) -> Result<Coin, CoinError> {
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(CoinError::Overflow { lhs: self.amount, op: "-", rhs: other.amount })?;
        Ok(Coin::new(amount, self.denom))
    }
}

/// `tokens * per_token_price`, checked against overflow and a configured
/// ceiling (spec §5).
pub fn checked_cost(tokens: u64, per_token_price: u64, max_cost: i64) -> Result<i64, CoinError> {
    let tokens = i128::from(tokens);
    let price = i128::from(per_token_price);
    let product = tokens
        .checked_mul(price)
        .ok_or(CoinError::Overflow { lhs: tokens as i64, op: "*", rhs: price as i64 })?;
    if product > i128::from(max_cost) {
        return Err(CoinError::Overflow {
            lhs: tokens as i64,
            op: "* (exceeds max_cost)",
            rhs: price as i64,
        });
    }
    i64::try_from(product).map_err(|_| CoinError::Overflow {
        lhs: tokens as i64,
        op: "*",
        rhs: price as i64,
    })
}
