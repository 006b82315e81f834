//! Deployment receipt builder for tests.

use crate::DeploymentReceipt;
use alloy_primitives::{Address, B256};

/// Builder for creating DeploymentReceipt instances with sensible defaults.
///
/// The default receipt describes a successful creation at a fixed address.
#[derive(Debug, Clone)]
pub struct DeploymentReceiptBuilder {
	transaction_hash: B256,
	contract_address: Option<Address>,
	block_number: Option<u64>,
	gas_used: u64,
	success: bool,
}

impl Default for DeploymentReceiptBuilder {
	fn default() -> Self {
		Self {
			transaction_hash: B256::repeat_byte(0x11),
			contract_address: Some(Address::repeat_byte(0x5f)),
			block_number: Some(12345),
			gas_used: 1_250_000,
			success: true,
		}
	}
}

impl DeploymentReceiptBuilder {
	/// Creates a new DeploymentReceiptBuilder with default values.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the transaction hash.
	pub fn with_hash(mut self, hash: B256) -> Self {
		self.transaction_hash = hash;
		self
	}

	/// Sets the created contract address.
	pub fn with_contract_address(mut self, address: Option<Address>) -> Self {
		self.contract_address = address;
		self
	}

	/// Sets the block number.
	pub fn with_block_number(mut self, block_number: u64) -> Self {
		self.block_number = Some(block_number);
		self
	}

	/// Convenience method to create a reverted receipt.
	pub fn reverted(mut self) -> Self {
		self.success = false;
		self.contract_address = None;
		self
	}

	/// Builds the DeploymentReceipt instance.
	pub fn build(self) -> DeploymentReceipt {
		DeploymentReceipt {
			transaction_hash: self.transaction_hash,
			contract_address: self.contract_address,
			block_number: self.block_number,
			gas_used: self.gas_used,
			success: self.success,
		}
	}
}
