//! Node-managed accounts.
//!
//! Development nodes (anvil, hardhat node, geth --dev) expose unlocked
//! accounts through `eth_accounts` and sign `eth_sendTransaction` requests
//! on their behalf. This is the default account source of `localhost`.

use crate::{AccountError, AccountInterface, AccountSigner};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;

/// Accounts exposed by the node at the configured RPC endpoint.
pub struct NodeAccounts {
	provider: DynProvider,
}

impl NodeAccounts {
	/// Creates the account source for an RPC endpoint.
	///
	/// Only the URL is validated here; the node is contacted when signers are
	/// requested.
	pub fn new(rpc_url: &str) -> Result<Self, AccountError> {
		let url = rpc_url
			.parse()
			.map_err(|e| AccountError::Network(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

		let provider = ProviderBuilder::new().connect_http(url).erased();

		Ok(Self { provider })
	}
}

#[async_trait]
impl AccountInterface for NodeAccounts {
	fn kind(&self) -> &'static str {
		"remote"
	}

	async fn signers(&self) -> Result<Vec<AccountSigner>, AccountError> {
		let accounts = self
			.provider
			.get_accounts()
			.await
			.map_err(|e| AccountError::Network(format!("Failed to list node accounts: {}", e)))?;

		tracing::debug!(count = accounts.len(), "Node exposes unlocked accounts");
		Ok(accounts.into_iter().map(AccountSigner::Unlocked).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_node_accounts_accepts_http_url() {
		assert!(NodeAccounts::new("http://127.0.0.1:8545").is_ok());
	}

	#[test]
	fn test_node_accounts_rejects_invalid_url() {
		let result = NodeAccounts::new("127.0.0.1 8545");
		assert!(matches!(result, Err(AccountError::Network(_))));
	}

	#[tokio::test]
	async fn test_node_accounts_unreachable_node() {
		// Port 9 (discard) is not an RPC endpoint.
		let accounts = NodeAccounts::new("http://127.0.0.1:9").unwrap();
		let result = accounts.signers().await;
		assert!(matches!(result, Err(AccountError::Network(_))));
	}
}
