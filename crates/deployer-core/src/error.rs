//! Error types for the deployment workflow.
//!
//! Each collaborator has its own error enum; they are folded into
//! [`DeploymentError`] here so a caller only deals with one taxonomy.

use crate::artifact::ArtifactError;
use alloy_primitives::B256;
use deployer_account::AccountError;
use deployer_config::ConfigError;
use deployer_delivery::DeliveryError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can end a deployment.
#[derive(Debug, Error)]
pub enum DeploymentError {
	/// No account is available to sign the deployment.
	#[error("No signer available: {0}")]
	NoSignerAvailable(String),
	/// The contract artifact could not be found.
	#[error("Artifact not found: {0}")]
	ArtifactNotFound(String),
	/// The contract artifact exists but cannot be deployed.
	#[error("Invalid artifact: {0}")]
	InvalidArtifact(String),
	/// A required setting, such as the owner address, is not set.
	#[error("Missing configuration: {0}")]
	MissingConfiguration(String),
	/// A setting is present but unusable.
	#[error("Invalid configuration: {0}")]
	InvalidConfiguration(String),
	/// The network refused the transaction, or it reverted.
	#[error("Transaction rejected: {0}")]
	TransactionRejected(String),
	/// The transaction was not confirmed within the confirmation window.
	#[error("Transaction {hash} was not confirmed within {timeout:?}")]
	ConfirmationTimeout { hash: B256, timeout: Duration },
	/// The node could not be reached.
	#[error("Network error: {0}")]
	Network(String),
}

impl From<AccountError> for DeploymentError {
	fn from(err: AccountError) -> Self {
		match err {
			AccountError::NoSignerAvailable(msg) => Self::NoSignerAvailable(msg),
			AccountError::InvalidKey(msg) => Self::InvalidConfiguration(msg),
			AccountError::Network(msg) => Self::Network(msg),
		}
	}
}

impl From<ArtifactError> for DeploymentError {
	fn from(err: ArtifactError) -> Self {
		match err {
			ArtifactError::NotFound { .. } => Self::ArtifactNotFound(err.to_string()),
			ArtifactError::Invalid { .. } => Self::InvalidArtifact(err.to_string()),
		}
	}
}

impl From<DeliveryError> for DeploymentError {
	fn from(err: DeliveryError) -> Self {
		match err {
			DeliveryError::Rejected(msg) => Self::TransactionRejected(msg),
			DeliveryError::Network(msg) => Self::Network(msg),
		}
	}
}

impl From<ConfigError> for DeploymentError {
	fn from(err: ConfigError) -> Self {
		Self::InvalidConfiguration(err.to_string())
	}
}
