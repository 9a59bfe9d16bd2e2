//! Deterministic decimal arithmetic shared by the reputation, validation,
//! and throttling modules.
//!
//! No floating point is used anywhere in this crate (spec §5: "All
//! floating-point is forbidden"). `Decimal` wraps an arbitrary-precision
//! `(coefficient, exponent)` value; [`taylor::exp_2x`] and [`taylor::tanh`]
//! reimplement the transcendental functions those modules need as a fixed
//! 20-term Taylor series so every replica computes byte-identical results.

pub mod decimal;
pub mod errors;
pub mod taylor;

pub use decimal::Decimal;
pub use errors::DecimalError;
