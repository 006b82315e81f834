//! Core deployment engine.
//!
//! This crate ties the account, delivery and configuration crates together:
//! it resolves compiler artifacts, runs the deployment workflow and saves its
//! results.

pub mod artifact;
pub mod deployer;
pub mod error;
pub mod writer;

#[cfg(test)]
mod fixtures;

pub use artifact::{ArtifactError, ArtifactStore, ContractArtifact};
pub use deployer::{
	DeployedContract, DeploySettings, Deployer, DeploymentEvent, DeploymentRequest,
};
pub use error::DeploymentError;
pub use writer::{ArtifactWriter, SavedFiles, WriteError};

use deployer_account::{create_account_source, AccountService};
use deployer_config::Config;
use deployer_delivery::AlloyDelivery;
use std::sync::Arc;

/// Builds a deployer for a named network of the configuration.
///
/// Nothing is sent to the node here; malformed keys, RPC URLs and unknown
/// network names are reported before a deployment is attempted.
pub fn build_deployer(config: &Config, network_name: &str) -> Result<Deployer, DeploymentError> {
	let network = config.network(network_name)?;

	let accounts = create_account_source(&network.accounts, &network.rpc_url)?;
	let delivery = AlloyDelivery::new(&network)?;

	tracing::debug!(
		network = network_name,
		rpc_url = %network.rpc_url,
		accounts = ?network.accounts,
		confirmations = network.confirmations,
		timeout_secs = network.confirmation_timeout_seconds,
		"Configured deployer"
	);

	Ok(Deployer::new(
		AccountService::new(accounts),
		Arc::new(delivery),
		ArtifactStore::new(&config.artifacts_dir),
		DeploySettings::from(&network),
	))
}
