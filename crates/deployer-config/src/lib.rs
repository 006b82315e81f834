//! Configuration module for the contract deployer.
//!
//! This module provides the structures and utilities for loading the deployer
//! configuration from a TOML file. String values may reference the
//! environment with `${VAR}` or `${VAR:-default}`, which keeps RPC URLs and
//! private keys out of the file itself. References inside a network are only
//! resolved when that network is selected, so a variable needed by one
//! network does not have to be set to deploy to another.
//!
//! A missing file is not an error: the built-in defaults deploy the `Antrix`
//! contract from `./artifacts` to a node on `http://127.0.0.1:8545`.

pub mod builders;

pub use builders::config::ConfigBuilder;

use deployer_types::{AccountSource, NetworkConfig, NetworksConfig, LOCALHOST_NETWORK};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the deployer.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Directory searched for compiler artifacts.
	#[serde(default = "default_artifacts_dir")]
	pub artifacts_dir: PathBuf,
	/// Name of the contract to deploy.
	#[serde(default = "default_contract")]
	pub contract: String,
	/// Environment variable holding the owner address passed to the constructor.
	#[serde(default = "default_owner_env")]
	pub owner_env: String,
	/// Deployment targets by name.
	#[serde(default)]
	pub networks: NetworksConfig,
}

/// Returns the default artifact directory, the Hardhat output layout.
fn default_artifacts_dir() -> PathBuf {
	PathBuf::from("artifacts")
}

fn default_contract() -> String {
	"Antrix".to_string()
}

fn default_owner_env() -> String {
	"OWNER_ADDRESS".to_string()
}

impl Default for Config {
	fn default() -> Self {
		Self {
			artifacts_dir: default_artifacts_dir(),
			contract: default_contract(),
			owner_env: default_owner_env(),
			networks: NetworksConfig::new(),
		}
	}
}

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

fn check_input_size(input: &str) -> Result<(), ConfigError> {
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}
	Ok(())
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	check_input_size(input)?;

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {e}")))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let var_name = var_name.as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{var_name}' not found"
					)));
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving `${VAR}` references first.
	///
	/// The `.env` file is expected to have been loaded by the caller, so that
	/// its variables take part in the resolution.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("{}: {}", path.display(), e),
			))
		})?;

		let config: Config = content.parse()?;
		tracing::debug!(
			path = %path.display(),
			networks = config.networks.len(),
			"Loaded configuration"
		);
		Ok(config)
	}

	/// Loads the configuration file, or falls back to the defaults when the
	/// file does not exist.
	pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		if tokio::fs::try_exists(path).await? {
			Self::from_file(path).await
		} else {
			tracing::info!(
				path = %path.display(),
				"Configuration file not found, using defaults"
			);
			Ok(Self::default())
		}
	}

	/// Returns the configuration of a named network, with its `${VAR}`
	/// references resolved.
	///
	/// `localhost` always exists; an entry in the file replaces the built-in
	/// one entirely.
	pub fn network(&self, name: &str) -> Result<NetworkConfig, ConfigError> {
		if let Some(network) = self.networks.get(name) {
			return resolve_network(name, network);
		}
		if name == LOCALHOST_NETWORK {
			return Ok(NetworkConfig::localhost());
		}

		Err(ConfigError::Validation(format!(
			"Unknown network '{}'. Available networks: {}",
			name,
			self.network_names().join(", ")
		)))
	}

	/// Names of every network that can be deployed to, sorted.
	pub fn network_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.networks.keys().cloned().collect();
		if !self.networks.contains_key(LOCALHOST_NETWORK) {
			names.push(LOCALHOST_NETWORK.to_string());
		}
		names.sort();
		names
	}

	/// Validates the configuration to ensure all required fields are properly set.
	///
	/// An empty account list is accepted here; it is reported as a missing
	/// signer when a deployment is attempted.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.contract.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Contract name cannot be empty".into(),
			));
		}
		if self.owner_env.trim().is_empty() {
			return Err(ConfigError::Validation("owner_env cannot be empty".into()));
		}
		if self.artifacts_dir.as_os_str().is_empty() {
			return Err(ConfigError::Validation(
				"artifacts_dir cannot be empty".into(),
			));
		}

		for (name, network) in &self.networks {
			if network.rpc_url.trim().is_empty() {
				return Err(ConfigError::Validation(format!(
					"Network '{name}' must have an rpc_url"
				)));
			}
			if network.confirmation_timeout_seconds == 0 {
				return Err(ConfigError::Validation(format!(
					"Network '{name}': confirmation_timeout_seconds must be greater than 0"
				)));
			}
			if network.poll_interval_ms == Some(0) {
				return Err(ConfigError::Validation(format!(
					"Network '{name}': poll_interval_ms must be greater than 0"
				)));
			}
			if let AccountSource::PrivateKeys(keys) = &network.accounts {
				if keys.iter().any(|key| key.trim().is_empty()) {
					return Err(ConfigError::Validation(format!(
						"Network '{name}': accounts must not contain empty keys"
					)));
				}
			}
		}

		Ok(())
	}
}

/// Resolves the `${VAR}` references of one network and checks the result.
fn resolve_network(name: &str, network: &NetworkConfig) -> Result<NetworkConfig, ConfigError> {
	let in_network =
		|e: ConfigError| ConfigError::Validation(format!("Network '{name}': {e}"));

	let mut resolved = network.clone();
	resolved.rpc_url = resolve_env_vars(&network.rpc_url).map_err(in_network)?;
	if resolved.rpc_url.trim().is_empty() {
		return Err(ConfigError::Validation(format!(
			"Network '{name}' must have an rpc_url"
		)));
	}

	if let AccountSource::PrivateKeys(keys) = &network.accounts {
		let keys = keys
			.iter()
			.map(|key| resolve_env_vars(key))
			.collect::<Result<Vec<_>, _>>()
			.map_err(in_network)?;
		if keys.iter().any(|key| key.trim().is_empty()) {
			return Err(ConfigError::Validation(format!(
				"Network '{name}': accounts must not contain empty keys"
			)));
		}
		resolved.accounts = AccountSource::PrivateKeys(keys);
	}

	Ok(resolved)
}

/// Implementation of FromStr trait for Config to enable parsing from string.
///
/// This allows configuration to be parsed from TOML strings using the standard
/// string parsing interface. Top-level environment references are resolved
/// and the configuration is validated automatically; network values are
/// resolved by [`Config::network`].
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		check_input_size(s)?;
		let mut config: Config = toml::from_str(s)?;

		config.contract = resolve_env_vars(&config.contract)?;
		config.owner_env = resolve_env_vars(&config.owner_env)?;
		if let Some(dir) = config.artifacts_dir.to_str() {
			config.artifacts_dir = PathBuf::from(resolve_env_vars(dir)?);
		}

		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use deployer_types::{DEFAULT_CONFIRMATIONS, DEFAULT_CONFIRMATION_TIMEOUT_SECONDS};
	use std::io::Write;

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("DEPLOYER_TEST_HOST", "localhost");
		std::env::set_var("DEPLOYER_TEST_PORT", "8545");

		let input = "rpc_url = \"http://${DEPLOYER_TEST_HOST}:${DEPLOYER_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "rpc_url = \"http://localhost:8545\"");

		std::env::remove_var("DEPLOYER_TEST_HOST");
		std::env::remove_var("DEPLOYER_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${DEPLOYER_MISSING_VAR:-default_value}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"default_value\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${DEPLOYER_MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("DEPLOYER_MISSING_VAR"));
	}

	#[test]
	fn test_oversized_input_rejected() {
		let input = "#".repeat(1024 * 1024 + 1);
		let result = resolve_env_vars(&input);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_empty_config_uses_defaults() {
		let config: Config = "".parse().unwrap();
		assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
		assert_eq!(config.contract, "Antrix");
		assert_eq!(config.owner_env, "OWNER_ADDRESS");
		assert!(config.networks.is_empty());
	}

	#[test]
	fn test_full_config() {
		std::env::set_var(
			"DEPLOYER_TEST_KEY",
			"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
		);

		let config_str = r#"
artifacts_dir = "out"
contract = "Token"
owner_env = "TOKEN_OWNER"

[networks.localhost]
rpc_url = "http://127.0.0.1:8545"
accounts = "remote"

[networks.sepolia]
rpc_url = "${DEPLOYER_TEST_SEPOLIA_URL:-https://rpc.sepolia.org}"
chain_id = 11155111
accounts = ["${DEPLOYER_TEST_KEY}"]
confirmations = 2
confirmation_timeout_seconds = 600
poll_interval_ms = 4000
"#;

		let config: Config = config_str.parse().unwrap();
		assert_eq!(config.artifacts_dir, PathBuf::from("out"));
		assert_eq!(config.contract, "Token");
		assert_eq!(config.owner_env, "TOKEN_OWNER");

		let sepolia = config.network("sepolia").unwrap();
		assert_eq!(sepolia.rpc_url, "https://rpc.sepolia.org");
		assert_eq!(sepolia.chain_id, Some(11155111));
		assert_eq!(sepolia.confirmations, 2);
		assert_eq!(sepolia.confirmation_timeout_seconds, 600);
		assert_eq!(sepolia.poll_interval_ms, Some(4000));
		match &sepolia.accounts {
			AccountSource::PrivateKeys(keys) => {
				assert_eq!(keys.len(), 1);
				assert!(keys[0].starts_with("0xac0974"));
			},
			other => panic!("expected private keys, got {:?}", other),
		}

		assert!(config.network("localhost").unwrap().accounts.is_remote());

		std::env::remove_var("DEPLOYER_TEST_KEY");
	}

	#[test]
	fn test_example_config_parses() {
		let config: Config = include_str!("../../../deploy.example.toml").parse().unwrap();
		assert_eq!(config.contract, "Antrix");
		assert_eq!(config.network_names(), vec!["localhost", "sepolia"]);
		assert!(config.network("localhost").unwrap().accounts.is_remote());
	}

	#[test]
	fn test_unset_variable_only_affects_its_network() {
		let config: Config = r#"
[networks.localhost]
rpc_url = "http://127.0.0.1:8545"
accounts = "remote"

[networks.testnet]
rpc_url = "${DEPLOYER_TEST_UNSET_RPC:-https://rpc.example.org}"
accounts = ["${DEPLOYER_TEST_UNSET_KEY}"]
"#
		.parse()
		.unwrap();

		let localhost = config.network("localhost").unwrap();
		assert_eq!(localhost.rpc_url, "http://127.0.0.1:8545");

		let err = config.network("testnet").unwrap_err().to_string();
		assert!(err.contains("testnet"));
		assert!(err.contains("DEPLOYER_TEST_UNSET_KEY"));
	}

	#[test]
	fn test_network_keys_resolved_on_selection() {
		std::env::set_var("DEPLOYER_TEST_SELECTED_KEY", "0xabc");
		let config: Config = r#"
[networks.testnet]
rpc_url = "https://rpc.example.org"
accounts = ["${DEPLOYER_TEST_SELECTED_KEY}"]
"#
		.parse()
		.unwrap();

		let network = config.network("testnet").unwrap();
		assert_eq!(
			network.accounts,
			AccountSource::PrivateKeys(vec!["0xabc".to_string()])
		);
		std::env::remove_var("DEPLOYER_TEST_SELECTED_KEY");
	}

	#[test]
	fn test_key_resolving_to_empty_rejected() {
		let config: Config = r#"
[networks.testnet]
rpc_url = "https://rpc.example.org"
accounts = ["${DEPLOYER_TEST_EMPTY_KEY:-}"]
"#
		.parse()
		.unwrap();

		let err = config.network("testnet").unwrap_err().to_string();
		assert!(err.contains("empty keys"));
	}

	#[test]
	fn test_builtin_localhost_network() {
		let config = Config::default();
		let network = config.network("localhost").unwrap();
		assert_eq!(network, NetworkConfig::localhost());
		assert_eq!(network.confirmations, DEFAULT_CONFIRMATIONS);
		assert_eq!(
			network.confirmation_timeout_seconds,
			DEFAULT_CONFIRMATION_TIMEOUT_SECONDS
		);
	}

	#[test]
	fn test_localhost_can_be_overridden() {
		let config: Config = r#"
[networks.localhost]
rpc_url = "http://127.0.0.1:9545"
confirmation_timeout_seconds = 30
"#
		.parse()
		.unwrap();

		let network = config.network("localhost").unwrap();
		assert_eq!(network.rpc_url, "http://127.0.0.1:9545");
		assert_eq!(network.confirmation_timeout_seconds, 30);
	}

	#[test]
	fn test_unknown_network_lists_available() {
		let config: Config = r#"
[networks.sepolia]
rpc_url = "https://rpc.sepolia.org"
"#
		.parse()
		.unwrap();

		let err = config.network("mainnet").unwrap_err().to_string();
		assert!(err.contains("mainnet"));
		assert!(err.contains("localhost, sepolia"));
	}

	#[test]
	fn test_empty_contract_rejected() {
		let result: Result<Config, _> = "contract = \"\"".parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_zero_timeout_rejected() {
		let result: Result<Config, _> = r#"
[networks.localhost]
rpc_url = "http://127.0.0.1:8545"
confirmation_timeout_seconds = 0
"#
		.parse();
		let err = result.unwrap_err().to_string();
		assert!(err.contains("confirmation_timeout_seconds"));
	}

	#[test]
	fn test_missing_rpc_url_rejected() {
		let result: Result<Config, _> = r#"
[networks.sepolia]
chain_id = 11155111
"#
		.parse();
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_unknown_field_rejected() {
		let result: Result<Config, _> = "contracts = \"Antrix\"".parse();
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_empty_key_list_accepted() {
		let config: Config = r#"
[networks.sepolia]
rpc_url = "https://rpc.sepolia.org"
accounts = []
"#
		.parse()
		.unwrap();
		let network = config.network("sepolia").unwrap();
		assert_eq!(network.accounts, AccountSource::PrivateKeys(vec![]));
	}

	#[tokio::test]
	async fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "contract = \"Vault\"").unwrap();

		let config = Config::from_file(file.path()).await.unwrap();
		assert_eq!(config.contract, "Vault");
	}

	#[tokio::test]
	async fn test_load_or_default_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let config = Config::load_or_default(dir.path().join("deploy.toml"))
			.await
			.unwrap();
		assert_eq!(config.contract, "Antrix");
	}

	#[tokio::test]
	async fn test_from_file_missing_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let result = Config::from_file(dir.path().join("deploy.toml")).await;
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}
}
