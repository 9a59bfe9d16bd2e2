//! Aggregated governance configuration (spec §6 configuration table),
//! composing each module's own `Params` the way the teacher's
//! `node-runtime::container::config::NodeConfig` composes one struct per
//! subsystem.

use serde::{Deserialize, Serialize};

/// The single process-wide parameter set every module keeper reads from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub inference: im_01_inference::Params,
    pub reputation: im_02_reputation::Params,
    pub collateral: im_04_collateral::Params,
    pub dkg: im_06_dkg::Params,
    pub auth: im_07_auth::Params,
    pub restrictions: im_08_restrictions::Params,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inference: im_01_inference::Params::default(),
            reputation: im_02_reputation::Params::default(),
            collateral: im_04_collateral::Params::default(),
            dkg: im_06_dkg::Params::default(),
            auth: im_07_auth::Params::default(),
            restrictions: im_08_restrictions::Params::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).expect("serialises");
        let decoded: Config = serde_json::from_str(&json).expect("round-trips");
        assert_eq!(decoded.collateral.unbonding_period_epochs, config.collateral.unbonding_period_epochs);
    }
}
