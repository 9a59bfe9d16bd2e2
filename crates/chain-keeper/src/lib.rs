//! # Chain Keeper
//!
//! The orchestration crate: wires `im-01-inference` through
//! `im-08-restrictions` over one [`chain_store::TypedStore`] and one
//! [`bank::LedgerBank`], dispatching the external message surface
//! (`msgs::Msg`) and running the per-block deadline hooks each module
//! keeper exposes. This is the crate a host binary (a node, or a test
//! harness) actually embeds — every `im-0X` crate is a pure module
//! library with no opinion about how the others are combined.

pub mod bank;
pub mod config;
pub mod errors;
pub mod keeper;
pub mod msgs;

pub use bank::LedgerBank;
pub use config::Config;
pub use errors::AppError;
pub use keeper::Keeper;
pub use msgs::Msg;
