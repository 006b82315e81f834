//! Transaction delivery module for the contract deployer.
//!
//! This module handles the submission and monitoring of the contract-creation
//! transaction. It hides the provider stack behind [`DeliveryInterface`] so
//! the deployment workflow can be exercised without a node.

use alloy_primitives::B256;
use async_trait::async_trait;
use deployer_account::AccountSigner;
use deployer_types::{DeploymentReceipt, DeploymentTransaction};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

pub use implementations::evm::alloy::AlloyDelivery;

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// The node answered with a JSON-RPC error, e.g. insufficient funds or a
	/// nonce conflict.
	#[error("Transaction rejected: {0}")]
	Rejected(String),
}

/// Trait defining the interface for transaction delivery implementations.
///
/// Implementations talk to exactly one network. None of the methods retry:
/// a failure is returned to the caller as soon as it is observed.
#[async_trait]
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait DeliveryInterface: Send + Sync {
	/// Returns the chain id reported by the node.
	async fn chain_id(&self) -> Result<u64, DeliveryError>;

	/// Signs (or has the node sign) and submits a deployment transaction.
	///
	/// Returns as soon as the node accepted the transaction.
	async fn submit(
		&self,
		tx: DeploymentTransaction,
		signer: &AccountSigner,
	) -> Result<B256, DeliveryError>;

	/// Waits until the transaction has the requested number of confirmations
	/// and returns its receipt.
	///
	/// This call does not time out on its own; callers bound it.
	async fn wait_for_confirmation(
		&self,
		hash: B256,
		confirmations: u64,
	) -> Result<DeploymentReceipt, DeliveryError>;
}
