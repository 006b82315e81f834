//! Account management module for the contract deployer.
//!
//! This module provides the abstraction over where signing identities come
//! from. A network either lists private keys held by the deployer or
//! delegates signing to accounts unlocked on the node; in both cases the
//! first account is the deployment signer.

use async_trait::async_trait;
use deployer_types::AccountSource;
use thiserror::Error;

/// Signer abstraction module
pub mod signer;

/// Re-export AccountSigner for convenience
pub use signer::AccountSigner;

/// Re-export implementations
pub mod implementations {
	pub mod local;
	pub mod node;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// No account is configured or exposed by the node.
	#[error("No signer available: {0}")]
	NoSignerAvailable(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Error that occurs when the node cannot be queried for its accounts.
	#[error("Network error: {0}")]
	Network(String),
}

/// Trait defining the interface for account sources.
///
/// Implementations return every signer they know about, in configuration
/// order. They must not fail merely because the list is empty; choosing the
/// default signer is the job of [`AccountService`].
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait AccountInterface: Send + Sync {
	/// Short name of the implementation, used in log fields.
	fn kind(&self) -> &'static str;

	/// Lists the available signers.
	async fn signers(&self) -> Result<Vec<AccountSigner>, AccountError>;
}

/// Creates the account implementation matching a network's account source.
///
/// Local keys are parsed eagerly, so a malformed key is reported here rather
/// than in the middle of a deployment. Node-managed accounts are only queried
/// when [`AccountService::default_signer`] is called.
pub fn create_account_source(
	source: &AccountSource,
	rpc_url: &str,
) -> Result<Box<dyn AccountInterface>, AccountError> {
	match source {
		AccountSource::PrivateKeys(keys) => {
			Ok(Box::new(implementations::local::LocalAccounts::new(keys)?))
		},
		AccountSource::Node(_) => Ok(Box::new(implementations::node::NodeAccounts::new(
			rpc_url,
		)?)),
	}
}

/// Service that manages account operations.
///
/// Wraps an account implementation and applies the selection rule for the
/// deployment signer.
pub struct AccountService {
	/// The underlying account implementation.
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	/// Creates a new AccountService with the specified implementation.
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// Returns the first configured signer.
	///
	/// Fails with [`AccountError::NoSignerAvailable`] when the source is empty.
	pub async fn default_signer(&self) -> Result<AccountSigner, AccountError> {
		let kind = self.implementation.kind();
		let signer = self
			.implementation
			.signers()
			.await?
			.into_iter()
			.next()
			.ok_or_else(|| {
				AccountError::NoSignerAvailable(format!("no {} accounts configured", kind))
			})?;

		tracing::debug!(kind = kind, address = %signer.address(), "Selected default signer");
		Ok(signer)
	}
}
