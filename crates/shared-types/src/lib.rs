//! # Shared Types Crate
//!
//! The single source of truth for domain entities shared across the
//! inference-payment, reputation, collateral, vesting, DKG, auth, and
//! restriction module crates (data model, spec §3), plus the key layout
//! (spec §6) and event records (spec §6) those modules read and write
//! through `chain-store`.
//!
//! ## Design principles
//!
//! - **No floats in money or consensus-relevant math** — `Coin::amount` is
//!   an exact `i64`; probability/curve math lives in `shared-decimal`.
//! - **Stable key layout** — `keys::prefix` bytes are part of the on-chain
//!   schema and must never be renumbered.
//! - **Synchronous events** — `ModuleEvent` has no channel or subscriber
//!   attached; see the `events` module docs.

pub mod block_ctx;
pub mod coin;
pub mod entities;
pub mod errors;
pub mod events;
pub mod keys;

pub use block_ctx::BlockContext;
pub use coin::{checked_cost, Coin, CoinError, DenomId, BASE_DENOM};
pub use entities::*;
pub use errors::{fatal, CoreError, ErrorKind};
pub use events::ModuleEvent;
