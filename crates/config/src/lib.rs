//! Configuration types for the dispute game challenger.
//!
//! This crate provides:
//! - Network configurations (mainnet, testnet)
//! - Fault proof contract addresses for different chains

pub mod network;

pub use network::{L1Config, L2Config, NetworkConfig, NetworkConfigBuilder, NetworkType};
