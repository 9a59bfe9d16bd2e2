//! Logging configuration from environment variables.

use std::env;

/// Configuration for the keeper's structured logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line.
    pub service_name: String,

    /// Module identifier (im-01, im-02, ... or "keeper" for the orchestrator).
    pub module_id: String,

    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,

    /// Whether to enable JSON formatted logs (for log-shipping agents).
    pub json_logs: bool,

    /// Network identifier (testnet, mainnet, devnet).
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "inference-chain".to_string(),
            module_id: "keeper".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            network: "testnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// - `IC_SERVICE_NAME`: service name (default: inference-chain)
    /// - `IC_MODULE_ID`: module identifier (default: keeper)
    /// - `IC_LOG_LEVEL` or `RUST_LOG`: log level (default: info)
    /// - `IC_JSON_LOGS`: enable JSON logs (default: true in containers)
    /// - `IC_NETWORK`: network name (default: testnet)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("IC_SERVICE_NAME")
                .unwrap_or_else(|_| "inference-chain".to_string()),

            module_id: env::var("IC_MODULE_ID").unwrap_or_else(|_| "keeper".to_string()),

            log_level: env::var("IC_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("IC_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            network: env::var("IC_NETWORK").unwrap_or_else(|_| "testnet".to_string()),
        }
    }

    /// Configuration scoped to a specific module, e.g. `for_module("im-04", "collateral")`.
    pub fn for_module(module_id: &str, module_name: &str) -> Self {
        let mut config = Self::from_env();
        config.module_id = module_id.to_string();
        config.service_name = format!("inference-chain-{module_name}");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "inference-chain");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn for_module_sets_service_name() {
        let config = TelemetryConfig::for_module("im-04", "collateral");
        assert_eq!(config.module_id, "im-04");
        assert_eq!(config.service_name, "inference-chain-collateral");
    }
}
