//! Network configuration for the challenger.
//!
//! Provides chain-specific addresses and parameters for the L1 settlement
//! chain and the L2 whose outputs are disputed.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Network type (mainnet or testnet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    #[serde(alias = "testnet")]
    Sepolia,
}

/// L1 (settlement layer) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L1Config {
    /// Chain ID
    pub chain_id: u64,
    /// Block time in seconds (12 for Ethereum)
    pub block_time_secs: u64,
}

impl L1Config {
    /// Ethereum mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 1,
            block_time_secs: 12,
        }
    }

    /// Ethereum Sepolia testnet configuration.
    pub const fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            block_time_secs: 12,
        }
    }
}

/// L2 configuration, including the L1 fault proof contracts that settle it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2Config {
    /// Chain ID
    pub chain_id: u64,
    /// DisputeGameFactory proxy address on L1
    pub dispute_game_factory: Address,
}

impl L2Config {
    /// OP Mainnet configuration.
    pub const fn op_mainnet() -> Self {
        Self {
            chain_id: 10,
            // https://etherscan.io/address/0xe5965Ab5962eDc7477C8520243A95517CD252fA9
            dispute_game_factory: address!("0xe5965Ab5962eDc7477C8520243A95517CD252fA9"),
        }
    }

    /// OP Sepolia configuration.
    pub const fn op_sepolia() -> Self {
        Self {
            chain_id: 11155420,
            // https://sepolia.etherscan.io/address/0x05F9613aDB30026FFd634f38e5C4dFd30a197Fa1
            dispute_game_factory: address!("0x05F9613aDB30026FFd634f38e5C4dFd30a197Fa1"),
        }
    }
}

/// Complete network configuration for the challenger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network type (mainnet or testnet)
    pub network_type: NetworkType,
    /// L1 configuration
    pub l1: L1Config,
    /// L2 configuration
    pub l2: L2Config,
}

impl NetworkConfig {
    /// Create mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            l1: L1Config::mainnet(),
            l2: L2Config::op_mainnet(),
        }
    }

    /// Create testnet (Sepolia) configuration.
    pub const fn sepolia() -> Self {
        Self {
            network_type: NetworkType::Sepolia,
            l1: L1Config::sepolia(),
            l2: L2Config::op_sepolia(),
        }
    }

    /// Create configuration from network type.
    pub const fn from_network_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Sepolia => Self::sepolia(),
        }
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    network_type: NetworkType,
    l1: L1Config,
    l2: L2Config,
}

impl NetworkConfigBuilder {
    /// Start with mainnet defaults.
    pub const fn mainnet() -> Self {
        Self::from_config(NetworkConfig::mainnet())
    }

    /// Start with testnet defaults.
    pub const fn sepolia() -> Self {
        Self::from_config(NetworkConfig::sepolia())
    }

    /// Start with the defaults of the given network type.
    pub const fn from_network_type(network_type: NetworkType) -> Self {
        Self::from_config(NetworkConfig::from_network_type(network_type))
    }

    const fn from_config(config: NetworkConfig) -> Self {
        Self {
            network_type: config.network_type,
            l1: config.l1,
            l2: config.l2,
        }
    }

    /// Override the DisputeGameFactory address.
    pub const fn dispute_game_factory(mut self, address: Address) -> Self {
        self.l2.dispute_game_factory = address;
        self
    }

    /// Override the L1 chain ID (for devnets forked from a preset).
    pub const fn l1_chain_id(mut self, chain_id: u64) -> Self {
        self.l1.chain_id = chain_id;
        self
    }

    /// Build the network configuration.
    pub const fn build(self) -> NetworkConfig {
        NetworkConfig {
            network_type: self.network_type,
            l1: self.l1,
            l2: self.l2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_config() {
        let config = NetworkConfig::mainnet();
        assert_eq!(config.l1.chain_id, 1);
        assert_eq!(config.l2.chain_id, 10);
        assert_eq!(config.network_type, NetworkType::Mainnet);
    }

    #[test]
    fn test_sepolia_config() {
        let config = NetworkConfig::sepolia();
        assert_eq!(config.l1.chain_id, 11155111);
        assert_eq!(config.l2.chain_id, 11155420);
        assert_eq!(config.network_type, NetworkType::Sepolia);
    }

    #[test]
    fn test_presets_have_factory() {
        assert_ne!(NetworkConfig::mainnet().l2.dispute_game_factory, Address::ZERO);
        assert_ne!(NetworkConfig::sepolia().l2.dispute_game_factory, Address::ZERO);
    }

    #[test]
    fn test_custom_config_builder() {
        let custom_factory = address!("1111111111111111111111111111111111111111");

        let config = NetworkConfigBuilder::sepolia()
            .dispute_game_factory(custom_factory)
            .l1_chain_id(900)
            .build();

        assert_eq!(config.l2.dispute_game_factory, custom_factory);
        assert_eq!(config.l1.chain_id, 900);
        assert_eq!(config.network_type, NetworkType::Sepolia);
    }
}
