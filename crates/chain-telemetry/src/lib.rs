//! # Chain Telemetry
//!
//! Structured logging for the block keeper and module crates.
//!
//! This crate deliberately carries only the `tracing`/`tracing-subscriber`
//! foundation — no OTLP exporter, no Prometheus registry, no async runtime.
//! The core state machine is synchronous (spec §5) and has no long-running
//! process to export metrics from; observability here means readable,
//! greppable logs emitted as each module applies a block.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chain_telemetry::{TelemetryConfig, init_logging};
//!
//! fn main() {
//!     let _guard = init_logging(TelemetryConfig::from_env()).expect("logging init");
//!     // keeper runs here
//! }
//! ```

#![warn(missing_docs)]
#![allow(missing_docs)]

mod config;

pub use config::TelemetryConfig;

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log level filter: {0}")]
    Config(String),
}

/// Guard returned by [`init_logging`]. Holding it keeps the subscriber
/// installed; nothing needs flushing on drop since there is no exporter.
pub struct TelemetryGuard {
    _private: (),
}

/// Install the global `tracing` subscriber for the process.
pub fn init_logging(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
    .map_err(|e| TelemetryError::Config(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        module = %config.module_id,
        network = %config.network,
        "telemetry initialised"
    );

    Ok(TelemetryGuard { _private: () })
}

/// Convenience macro for creating a span scoped to a module keeper.
#[macro_export]
macro_rules! module_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_fields() {
        let config = TelemetryConfig::default();
        assert_eq!(config.network, "testnet");
        assert!(!config.json_logs);
    }
}
