//! Local private key accounts.
//!
//! Keys come from the network's `accounts` list in configuration, usually
//! through `${VAR}` references to the environment. They are parsed once, at
//! construction, and never logged.

use crate::{AccountError, AccountInterface, AccountSigner};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use deployer_types::without_0x_prefix;

/// Accounts backed by private keys held in memory.
#[derive(Debug)]
pub struct LocalAccounts {
	/// Parsed signers in configuration order.
	signers: Vec<PrivateKeySigner>,
}

impl LocalAccounts {
	/// Parses a list of hex-encoded private keys (with or without 0x prefix).
	///
	/// Errors name the position of the offending key, never its content.
	pub fn new(keys: &[String]) -> Result<Self, AccountError> {
		let signers = keys
			.iter()
			.enumerate()
			.map(|(index, key)| {
				parse_private_key(key).map_err(|reason| {
					AccountError::InvalidKey(format!("account #{}: {}", index, reason))
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self { signers })
	}
}

fn parse_private_key(key: &str) -> Result<PrivateKeySigner, String> {
	let key_without_prefix = without_0x_prefix(key.trim());

	if key_without_prefix.len() != 64 {
		return Err("Private key must be 64 hex characters (32 bytes)".to_string());
	}

	if !key_without_prefix.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err("Private key must be valid hexadecimal".to_string());
	}

	key_without_prefix
		.parse::<PrivateKeySigner>()
		.map_err(|e| format!("Invalid private key: {}", e))
}

#[async_trait]
impl AccountInterface for LocalAccounts {
	fn kind(&self) -> &'static str {
		"local"
	}

	async fn signers(&self) -> Result<Vec<AccountSigner>, AccountError> {
		Ok(self
			.signers
			.iter()
			.cloned()
			.map(AccountSigner::Local)
			.collect())
	}
}
