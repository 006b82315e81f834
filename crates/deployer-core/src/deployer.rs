//! The deployment workflow.
//!
//! [`Deployer::deploy`] runs one deployment from signer selection to the
//! confirmed contract address. It never retries: every step either succeeds
//! once or ends the run with a [`DeploymentError`].

use crate::{ArtifactStore, DeploymentError};
use alloy_primitives::{Address, B256};
use deployer_account::AccountService;
use deployer_delivery::DeliveryInterface;
use deployer_types::{short_hash, DeploymentTransaction, NetworkConfig};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Confirmation policy and expectations of the target network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploySettings {
	/// Blocks the deployment must be buried under.
	pub confirmations: u64,
	/// Maximum time to wait for those confirmations.
	pub confirmation_timeout: Duration,
	/// Chain id the node must report, when pinned in configuration.
	pub expected_chain_id: Option<u64>,
}

impl From<&NetworkConfig> for DeploySettings {
	fn from(network: &NetworkConfig) -> Self {
		Self {
			confirmations: network.confirmations,
			confirmation_timeout: network.confirmation_timeout(),
			expected_chain_id: network.chain_id,
		}
	}
}

/// What to deploy, and for whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
	/// Name of the contract artifact.
	pub contract: String,
	/// Name of the variable the owner was read from, for error messages.
	pub owner_variable: String,
	/// Raw owner value, `None` when the variable is not set.
	pub owner: Option<String>,
}

impl DeploymentRequest {
	pub fn new(
		contract: impl Into<String>,
		owner_variable: impl Into<String>,
		owner: Option<String>,
	) -> Self {
		Self {
			contract: contract.into(),
			owner_variable: owner_variable.into(),
			owner,
		}
	}

	/// Reads the owner from the named environment variable.
	pub fn from_env(contract: impl Into<String>, owner_variable: impl Into<String>) -> Self {
		let owner_variable = owner_variable.into();
		let owner = std::env::var(&owner_variable).ok();
		Self::new(contract, owner_variable, owner)
	}

	/// Parses the owner address.
	///
	/// An unset or blank variable is missing configuration; anything that is
	/// not a 20-byte hex address is invalid configuration.
	pub fn owner_address(&self) -> Result<Address, DeploymentError> {
		let raw = self
			.owner
			.as_deref()
			.map(str::trim)
			.filter(|value| !value.is_empty())
			.ok_or_else(|| {
				DeploymentError::MissingConfiguration(format!(
					"{} is not set",
					self.owner_variable
				))
			})?;

		let owner = Address::from_str(raw).map_err(|e| {
			DeploymentError::InvalidConfiguration(format!(
				"{} is not a valid address ({}): {}",
				self.owner_variable, raw, e
			))
		})?;

		if owner.is_zero() {
			tracing::warn!(variable = %self.owner_variable, "Owner is the zero address");
		}
		Ok(owner)
	}
}

/// Reference to a contract created by a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
	pub contract: String,
	pub address: Address,
	pub transaction_hash: B256,
	pub block_number: Option<u64>,
	pub gas_used: u64,
}

/// Progress notifications of a deployment, in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentEvent {
	/// The deployment has begun.
	Started,
	/// The signing account has been chosen.
	SignerResolved { address: Address },
	/// The creation transaction was accepted by the node.
	Submitted { transaction_hash: B256 },
	/// The contract is confirmed on chain.
	Deployed(DeployedContract),
}

/// Deploys a single contract to a single network.
pub struct Deployer {
	accounts: AccountService,
	delivery: Arc<dyn DeliveryInterface>,
	artifacts: ArtifactStore,
	settings: DeploySettings,
}

impl Deployer {
	pub fn new(
		accounts: AccountService,
		delivery: Arc<dyn DeliveryInterface>,
		artifacts: ArtifactStore,
		settings: DeploySettings,
	) -> Self {
		Self {
			accounts,
			delivery,
			artifacts,
			settings,
		}
	}

	/// The artifact directory this deployer reads from.
	pub fn artifacts(&self) -> &ArtifactStore {
		&self.artifacts
	}

	pub fn settings(&self) -> &DeploySettings {
		&self.settings
	}

	/// Runs one deployment, reporting progress through `on_event`.
	///
	/// At most one transaction is submitted. Calling this twice deploys two
	/// independent contracts.
	pub async fn deploy<F>(
		&self,
		request: &DeploymentRequest,
		mut on_event: F,
	) -> Result<DeployedContract, DeploymentError>
	where
		F: FnMut(&DeploymentEvent),
	{
		tracing::info!(contract = %request.contract, "Starting deployment");
		on_event(&DeploymentEvent::Started);

		let signer = self.accounts.default_signer().await?;
		let from = signer.address();
		on_event(&DeploymentEvent::SignerResolved { address: from });

		if let Some(expected) = self.settings.expected_chain_id {
			let actual = self.delivery.chain_id().await?;
			if actual != expected {
				return Err(DeploymentError::InvalidConfiguration(format!(
					"node reports chain id {}, expected {}",
					actual, expected
				)));
			}
		}
		let signer = signer.with_chain_id(self.settings.expected_chain_id);

		let artifact = self.artifacts.load(&request.contract).await?;
		let owner = request.owner_address()?;
		let data = artifact.deployment_data(owner)?;

		let tx = DeploymentTransaction {
			from,
			data,
			chain_id: self.settings.expected_chain_id,
		};
		let transaction_hash = self.delivery.submit(tx, &signer).await?;
		on_event(&DeploymentEvent::Submitted { transaction_hash });

		let timeout = self.settings.confirmation_timeout;
		let receipt = tokio::time::timeout(
			timeout,
			self.delivery
				.wait_for_confirmation(transaction_hash, self.settings.confirmations),
		)
		.await
		.map_err(|_| {
			tracing::warn!(
				tx_hash = %short_hash(&transaction_hash),
				timeout_secs = timeout.as_secs(),
				"Confirmation window elapsed"
			);
			DeploymentError::ConfirmationTimeout {
				hash: transaction_hash,
				timeout,
			}
		})??;

		if !receipt.success {
			return Err(DeploymentError::TransactionRejected(format!(
				"transaction {} reverted",
				transaction_hash
			)));
		}
		let address = receipt.contract_address.ok_or_else(|| {
			DeploymentError::TransactionRejected(format!(
				"receipt of {} has no contract address",
				transaction_hash
			))
		})?;

		let deployed = DeployedContract {
			contract: request.contract.clone(),
			address,
			transaction_hash,
			block_number: receipt.block_number,
			gas_used: receipt.gas_used,
		};
		tracing::info!(
			contract = %deployed.contract,
			address = %deployed.address,
			block = ?deployed.block_number,
			gas_used = deployed.gas_used,
			"Contract deployed"
		);
		on_event(&DeploymentEvent::Deployed(deployed.clone()));

		Ok(deployed)
	}
}
