use alloy_primitives::Address;
use config::{NetworkConfig, NetworkConfigBuilder, NetworkType};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use thiserror::Error;

const fn default_poll_interval_secs() -> u64 {
    12
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("l1_rpc_url must not be empty")]
    EmptyRpcUrl,

    #[error("poll_interval_secs must be greater than zero")]
    ZeroPollInterval,
}

/// Top-level challenger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// L1 RPC endpoint url
    pub l1_rpc_url: String,

    /// Network preset the fault proof contracts are taken from
    pub network: NetworkType,

    /// Overrides the preset DisputeGameFactory address
    #[serde(default)]
    pub dispute_game_factory: Option<Address>,

    /// Whether the operator agrees with the outputs being disputed
    pub agree_with_proposed_output: bool,

    /// Seconds between monitoring cycles
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Decide and log, never submit transactions
    #[serde(default)]
    pub dry_run: bool,

    /// Port of the Prometheus exporter; disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Sender of resolve transactions; derived from the signing key when unset
    #[serde(default)]
    pub from_address: Option<Address>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.l1_rpc_url.trim().is_empty() {
            return Err(ConfigError::EmptyRpcUrl);
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Network preset with any configured overrides applied.
    pub fn network_config(&self) -> NetworkConfig {
        let builder = NetworkConfigBuilder::from_network_type(self.network);
        match self.dispute_game_factory {
            Some(factory) => builder.dispute_game_factory(factory).build(),
            None => builder.build(),
        }
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const MINIMAL: &str = r#"
        l1_rpc_url = "http://localhost:8545"
        network = "sepolia"
        agree_with_proposed_output = true
    "#;

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::from_toml(MINIMAL).unwrap();

        assert_eq!(config.network, NetworkType::Sepolia);
        assert!(config.agree_with_proposed_output);
        assert_eq!(config.poll_interval(), Duration::from_secs(12));
        assert!(!config.dry_run);
        assert_eq!(config.metrics_port, None);
        assert_eq!(
            config.network_config().l2.dispute_game_factory,
            NetworkConfig::sepolia().l2.dispute_game_factory
        );
    }

    #[test]
    fn test_factory_override() {
        let contents = r#"
            l1_rpc_url = "http://localhost:8545"
            network = "mainnet"
            dispute_game_factory = "0x1111111111111111111111111111111111111111"
            agree_with_proposed_output = false
            poll_interval_secs = 60
            dry_run = true
            metrics_port = 9090
        "#;

        let config = Config::from_toml(contents).unwrap();

        assert_eq!(
            config.network_config().l2.dispute_game_factory,
            address!("1111111111111111111111111111111111111111")
        );
        assert_eq!(config.network_config().l1.chain_id, 1);
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert!(config.dry_run);
        assert_eq!(config.metrics_port, Some(9090));
    }

    #[test]
    fn test_rejects_zero_poll_interval() {
        let contents = format!("{MINIMAL}\npoll_interval_secs = 0\n");
        let err = Config::from_toml(&contents).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::ZeroPollInterval)
        );
    }

    #[test]
    fn test_rejects_empty_rpc_url() {
        let contents = r#"
            l1_rpc_url = " "
            network = "sepolia"
            agree_with_proposed_output = true
        "#;
        let err = Config::from_toml(contents).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::EmptyRpcUrl)
        );
    }

    #[test]
    fn test_missing_policy_is_an_error() {
        let contents = r#"
            l1_rpc_url = "http://localhost:8545"
            network = "sepolia"
        "#;
        assert!(Config::from_toml(contents).is_err());
    }
}
