//! Network configuration types for deployments.
//!
//! A network is addressed by name on the command line (`--network sepolia`)
//! and describes where to send the deployment, which accounts may sign it and
//! how long to wait for its confirmation.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Name of the network that exists even without a configuration file.
pub const LOCALHOST_NETWORK: &str = "localhost";

/// RPC endpoint of the built-in `localhost` network.
pub const LOCALHOST_RPC_URL: &str = "http://127.0.0.1:8545";

/// Confirmations awaited when a network does not configure its own.
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

/// Confirmation window used when a network does not configure its own.
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECONDS: u64 = 300;

/// Where the signing accounts of a network come from.
///
/// In TOML this is either the string `"remote"`, meaning the accounts
/// unlocked on the node itself, or a list of hex-encoded private keys. The
/// first account of the list is the one used for deployments.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AccountSource {
	/// Private keys held by the deployer process.
	PrivateKeys(Vec<String>),
	/// Accounts managed by the node and exposed through `eth_accounts`.
	Node(NodeManaged),
}

/// Marker for node-managed accounts, spelled `"remote"` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeManaged {
	Remote,
}

impl AccountSource {
	/// Node-managed accounts.
	pub fn remote() -> Self {
		Self::Node(NodeManaged::Remote)
	}

	/// Returns true when signing is delegated to the node.
	pub fn is_remote(&self) -> bool {
		matches!(self, Self::Node(_))
	}
}

impl Default for AccountSource {
	fn default() -> Self {
		Self::remote()
	}
}

// Private keys never reach log output.
impl fmt::Debug for AccountSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::PrivateKeys(keys) => f
				.debug_struct("AccountSource::PrivateKeys")
				.field("count", &keys.len())
				.finish_non_exhaustive(),
			Self::Node(_) => f.write_str("AccountSource::Remote"),
		}
	}
}

/// Configuration for a single deployment target.
///
/// # Fields
///
/// * `rpc_url` - HTTP(S) JSON-RPC endpoint of the node
/// * `chain_id` - Expected chain id; checked against the node before deploying
/// * `accounts` - Source of the signing accounts
/// * `confirmations` - Number of blocks the deployment must be buried under
/// * `confirmation_timeout_seconds` - Maximum time to wait for those confirmations
/// * `poll_interval_ms` - Override for the provider's block polling interval
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
	pub rpc_url: String,
	#[serde(default)]
	pub chain_id: Option<u64>,
	#[serde(default)]
	pub accounts: AccountSource,
	#[serde(default = "default_confirmations")]
	pub confirmations: u64,
	#[serde(default = "default_confirmation_timeout_seconds")]
	pub confirmation_timeout_seconds: u64,
	#[serde(default)]
	pub poll_interval_ms: Option<u64>,
}

fn default_confirmations() -> u64 {
	DEFAULT_CONFIRMATIONS
}

fn default_confirmation_timeout_seconds() -> u64 {
	DEFAULT_CONFIRMATION_TIMEOUT_SECONDS
}

impl NetworkConfig {
	/// The built-in development network: a local node with unlocked accounts.
	pub fn localhost() -> Self {
		Self {
			rpc_url: LOCALHOST_RPC_URL.to_string(),
			chain_id: None,
			accounts: AccountSource::remote(),
			confirmations: DEFAULT_CONFIRMATIONS,
			confirmation_timeout_seconds: DEFAULT_CONFIRMATION_TIMEOUT_SECONDS,
			poll_interval_ms: None,
		}
	}

	/// Confirmation window as a duration.
	pub fn confirmation_timeout(&self) -> std::time::Duration {
		std::time::Duration::from_secs(self.confirmation_timeout_seconds)
	}
}

/// Networks configuration keyed by network name.
pub type NetworksConfig = HashMap<String, NetworkConfig>;

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Deserialize)]
	struct Wrapper {
		network: NetworkConfig,
	}

	fn parse(toml_str: &str) -> NetworkConfig {
		toml::from_str::<Wrapper>(toml_str).unwrap().network
	}

	#[test]
	fn test_network_config_defaults() {
		let network = parse(
			r#"
			[network]
			rpc_url = "http://localhost:8545"
			"#,
		);

		assert_eq!(network.rpc_url, "http://localhost:8545");
		assert_eq!(network.chain_id, None);
		assert!(network.accounts.is_remote());
		assert_eq!(network.confirmations, DEFAULT_CONFIRMATIONS);
		assert_eq!(
			network.confirmation_timeout_seconds,
			DEFAULT_CONFIRMATION_TIMEOUT_SECONDS
		);
		assert_eq!(network.poll_interval_ms, None);
	}

	#[test]
	fn test_accounts_remote_string() {
		let network = parse(
			r#"
			[network]
			rpc_url = "http://localhost:8545"
			accounts = "remote"
			"#,
		);
		assert_eq!(network.accounts, AccountSource::remote());
	}

	#[test]
	fn test_accounts_private_key_list() {
		let network = parse(
			r#"
			[network]
			rpc_url = "https://rpc.sepolia.org"
			chain_id = 11155111
			accounts = ["0x01", "0x02"]
			confirmations = 2
			confirmation_timeout_seconds = 600
			"#,
		);

		assert_eq!(
			network.accounts,
			AccountSource::PrivateKeys(vec!["0x01".to_string(), "0x02".to_string()])
		);
		assert_eq!(network.chain_id, Some(11155111));
		assert_eq!(network.confirmations, 2);
		assert_eq!(network.confirmation_timeout().as_secs(), 600);
	}

	#[test]
	fn test_accounts_unknown_string_rejected() {
		let result = toml::from_str::<Wrapper>(
			r#"
			[network]
			rpc_url = "http://localhost:8545"
			accounts = "mnemonic"
			"#,
		);
		assert!(result.is_err());
	}

	#[test]
	fn test_account_source_debug_hides_keys() {
		let source = AccountSource::PrivateKeys(vec!["0xdeadbeef".to_string()]);
		let debug = format!("{:?}", source);
		assert!(!debug.contains("deadbeef"));
		assert!(debug.contains("count: 1"));
	}

	#[test]
	fn test_localhost_network() {
		let network = NetworkConfig::localhost();
		assert_eq!(network.rpc_url, LOCALHOST_RPC_URL);
		assert!(network.accounts.is_remote());
	}
}
