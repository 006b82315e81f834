//! Configuration builder for creating test and development configurations.
//!
//! This module provides utilities for constructing Config instances with
//! sensible defaults, particularly useful for testing scenarios.

use crate::Config;
use deployer_types::{AccountSource, NetworkConfig, NetworksConfig};
use std::path::PathBuf;

/// Builder for creating `Config` instances with a fluent API.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
	artifacts_dir: PathBuf,
	contract: String,
	owner_env: String,
	networks: NetworksConfig,
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigBuilder {
	/// Creates a new `ConfigBuilder` holding the built-in defaults.
	pub fn new() -> Self {
		let defaults = Config::default();
		Self {
			artifacts_dir: defaults.artifacts_dir,
			contract: defaults.contract,
			owner_env: defaults.owner_env,
			networks: defaults.networks,
		}
	}

	/// Sets the artifact directory.
	pub fn artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.artifacts_dir = dir.into();
		self
	}

	/// Sets the contract name.
	pub fn contract(mut self, contract: impl Into<String>) -> Self {
		self.contract = contract.into();
		self
	}

	/// Sets the environment variable holding the owner address.
	pub fn owner_env(mut self, variable: impl Into<String>) -> Self {
		self.owner_env = variable.into();
		self
	}

	/// Adds or replaces a network.
	pub fn network(mut self, name: impl Into<String>, network: NetworkConfig) -> Self {
		self.networks.insert(name.into(), network);
		self
	}

	/// Adds a network signing with the given private keys.
	pub fn network_with_keys(self, name: impl Into<String>, rpc_url: &str, keys: &[&str]) -> Self {
		let network = NetworkConfig {
			rpc_url: rpc_url.to_string(),
			accounts: AccountSource::PrivateKeys(keys.iter().map(|k| k.to_string()).collect()),
			..NetworkConfig::localhost()
		};
		self.network(name, network)
	}

	/// Builds the `Config` with the configured values.
	pub fn build(self) -> Config {
		Config {
			artifacts_dir: self.artifacts_dir,
			contract: self.contract,
			owner_env: self.owner_env,
			networks: self.networks,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builder_defaults_match_config_defaults() {
		let built = ConfigBuilder::new().build();
		let defaults = Config::default();
		assert_eq!(built.artifacts_dir, defaults.artifacts_dir);
		assert_eq!(built.contract, defaults.contract);
		assert_eq!(built.owner_env, defaults.owner_env);
		assert!(built.networks.is_empty());
	}

	#[test]
	fn test_builder_network_with_keys() {
		let config = ConfigBuilder::new()
			.contract("Vault")
			.network_with_keys("anvil", "http://127.0.0.1:8545", &["0x01"])
			.build();

		assert_eq!(config.contract, "Vault");
		let network = config.network("anvil").unwrap();
		assert!(!network.accounts.is_remote());
		assert_eq!(network.confirmations, 1);
	}
}
