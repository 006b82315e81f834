//! Transaction delivery types for contract creation.
//!
//! These types decouple the deployment workflow from the RPC types of the
//! underlying client library.

use alloy_primitives::{Address, Bytes, B256};

/// A contract-creation transaction ready to be signed and submitted.
///
/// Gas, nonce and fee fields are left to the delivery layer, which fills
/// them from the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTransaction {
	/// Account paying for and signing the deployment.
	pub from: Address,
	/// Creation bytecode followed by the ABI-encoded constructor arguments.
	pub data: Bytes,
	/// Chain the transaction is meant for, when known.
	pub chain_id: Option<u64>,
}

/// Receipt of a mined deployment transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReceipt {
	/// The hash of the transaction.
	pub transaction_hash: B256,
	/// Address of the created contract, if any.
	pub contract_address: Option<Address>,
	/// The block number where the transaction was included.
	pub block_number: Option<u64>,
	/// Gas consumed by the creation.
	pub gas_used: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
}
