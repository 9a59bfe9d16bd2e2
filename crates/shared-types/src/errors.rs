//! Shared error taxonomy (spec §7).
//!
//! Each module crate defines its own `thiserror` enum with module-specific
//! variants; this file holds only the cross-cutting `ErrorKind` tag so the
//! keeper can decide how to surface a failure without matching on every
//! concrete error type, and the `fatal` helper for invariant violations,
//! which are never recoverable (§7: "Panic the handler... the host will
//! halt the replica rather than diverge").

/// The four non-fatal error kinds from spec §7. "Transient" has no
/// variant here because the core issues none — every delivery is handled
/// idempotently via id keys instead of being retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    Forbidden,
}

/// A module error that can report which of the §7 kinds it belongs to.
pub trait CoreError: std::error::Error {
    fn kind(&self) -> ErrorKind;
}

/// Abort block application for an invariant violation (spec §7: "fatal").
/// Never call this for a recoverable error — return a `Result` instead.
#[track_caller]
pub fn fatal(invariant: &str, detail: impl std::fmt::Display) -> ! {
    panic!("invariant violation [{invariant}]: {detail}");
}
