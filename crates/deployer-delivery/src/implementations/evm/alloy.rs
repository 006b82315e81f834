//! Alloy-based delivery of deployment transactions.
//!
//! Local signers are attached to a wallet provider built for the submission;
//! node-managed accounts go through the plain provider, which relays the
//! request as `eth_sendTransaction` for the node to sign.

use crate::{DeliveryError, DeliveryInterface};
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::B256;
use alloy_provider::{DynProvider, PendingTransactionConfig, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::TransportError;
use async_trait::async_trait;
use deployer_account::AccountSigner;
use deployer_types::{short_hash, DeploymentReceipt, DeploymentTransaction, NetworkConfig};
use std::time::Duration;

/// Alloy-based EVM delivery implementation for a single network.
///
/// The transport has no retry layer: a rejected or failed request is
/// reported to the caller as is.
pub struct AlloyDelivery {
	/// RPC endpoint, kept to build signing providers.
	rpc_url: String,
	/// Block polling interval override.
	poll_interval: Option<Duration>,
	/// Provider without a wallet, used for reads and node-signed sends.
	provider: DynProvider,
}

impl AlloyDelivery {
	/// Creates a delivery for the given network.
	///
	/// Only the RPC URL is validated; no request is made to the node.
	pub fn new(network: &NetworkConfig) -> Result<Self, DeliveryError> {
		let url = network.rpc_url.parse().map_err(|e| {
			DeliveryError::Network(format!("Invalid RPC URL {}: {}", network.rpc_url, e))
		})?;

		let poll_interval = network.poll_interval_ms.map(Duration::from_millis);
		let provider = ProviderBuilder::new().connect_http(url);
		if let Some(interval) = poll_interval {
			provider.client().set_poll_interval(interval);
		}

		Ok(Self {
			rpc_url: network.rpc_url.clone(),
			poll_interval,
			provider: provider.erased(),
		})
	}

	/// Builds a provider that signs with the given local key.
	fn signing_provider(&self, signer: &PrivateKeySigner) -> Result<DynProvider, DeliveryError> {
		let url = self.rpc_url.parse().map_err(|e| {
			DeliveryError::Network(format!("Invalid RPC URL {}: {}", self.rpc_url, e))
		})?;

		let wallet = EthereumWallet::from(signer.clone());
		let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);
		if let Some(interval) = self.poll_interval {
			provider.client().set_poll_interval(interval);
		}

		Ok(provider.erased())
	}
}

/// Converts a deployment transaction into a contract-creation request.
///
/// Gas, fees and nonce are left to the provider's fillers.
pub(crate) fn deployment_request(tx: &DeploymentTransaction) -> TransactionRequest {
	let request = TransactionRequest::default()
		.with_from(tx.from)
		.with_deploy_code(tx.data.clone());

	match tx.chain_id {
		Some(chain_id) => request.with_chain_id(chain_id),
		None => request,
	}
}

/// Separates answers of the node from failures to reach it.
fn classify_send_error(err: TransportError) -> DeliveryError {
	match err.as_error_resp() {
		Some(payload) => DeliveryError::Rejected(payload.message.to_string()),
		None => DeliveryError::Network(format!("Failed to send transaction: {}", err)),
	}
}

#[async_trait]
impl DeliveryInterface for AlloyDelivery {
	async fn chain_id(&self) -> Result<u64, DeliveryError> {
		self.provider
			.get_chain_id()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get chain id: {}", e)))
	}

	async fn submit(
		&self,
		tx: DeploymentTransaction,
		signer: &AccountSigner,
	) -> Result<B256, DeliveryError> {
		let request = deployment_request(&tx);

		let provider = match signer {
			AccountSigner::Local(local) => self.signing_provider(local)?,
			AccountSigner::Unlocked(_) => self.provider.clone(),
		};

		tracing::debug!(
			from = %tx.from,
			data_len = tx.data.len(),
			local_signer = signer.is_local(),
			"Sending deployment transaction"
		);

		let pending_tx = provider.send_transaction(request).await.map_err(|e| {
			tracing::error!(from = %tx.from, "Deployment submission failed: {}", e);
			classify_send_error(e)
		})?;

		let tx_hash = *pending_tx.tx_hash();
		tracing::info!(tx_hash = %short_hash(&tx_hash), "Deployment transaction submitted");

		Ok(tx_hash)
	}

	async fn wait_for_confirmation(
		&self,
		hash: B256,
		confirmations: u64,
	) -> Result<DeploymentReceipt, DeliveryError> {
		let confirmations = confirmations.max(1);
		tracing::info!(
			tx_hash = %short_hash(&hash),
			"Waiting for {} confirmations",
			confirmations
		);

		let config = PendingTransactionConfig::new(hash).with_required_confirmations(confirmations);

		let pending_tx = self
			.provider
			.watch_pending_transaction(config)
			.await
			.map_err(|e| DeliveryError::Network(format!("Transaction watch failed: {}", e)))?;

		let confirmed_hash = pending_tx
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to confirm transaction: {}", e)))?;

		let receipt = self
			.provider
			.get_transaction_receipt(confirmed_hash)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get receipt: {}", e)))?
			.ok_or_else(|| {
				DeliveryError::Network(format!("Receipt for {} not found", confirmed_hash))
			})?;

		Ok(DeploymentReceipt {
			transaction_hash: receipt.transaction_hash,
			contract_address: receipt.contract_address,
			block_number: receipt.block_number,
			gas_used: receipt.gas_used,
			success: receipt.status(),
		})
	}
}
