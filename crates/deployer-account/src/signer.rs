//! Unified signer abstraction for different signing backends.
//!
//! This module provides the `AccountSigner` enum which allows delivery code
//! to work with any signer type without knowing the underlying implementation.

use alloy_primitives::Address;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;

/// Unified signer that wraps different signing backends.
#[derive(Clone)]
pub enum AccountSigner {
	/// Local signer using a private key stored in memory.
	Local(PrivateKeySigner),
	/// Account unlocked on the node; the node signs on `eth_sendTransaction`.
	Unlocked(Address),
}

impl AccountSigner {
	/// Returns the signer's Ethereum address.
	pub fn address(&self) -> Address {
		match self {
			Self::Local(s) => Signer::address(s),
			Self::Unlocked(address) => *address,
		}
	}

	/// Returns true when the private key is held by this process.
	pub fn is_local(&self) -> bool {
		matches!(self, Self::Local(_))
	}

	/// Returns the signer's chain ID, if it is bound to one.
	pub fn chain_id(&self) -> Option<u64> {
		match self {
			Self::Local(s) => Signer::chain_id(s),
			Self::Unlocked(_) => None,
		}
	}

	/// Returns a new signer bound to the specified chain ID.
	///
	/// Node-managed accounts are bound by the node itself and are returned
	/// unchanged.
	pub fn with_chain_id(self, chain_id: Option<u64>) -> Self {
		match self {
			Self::Local(s) => Self::Local(Signer::with_chain_id(s, chain_id)),
			unlocked @ Self::Unlocked(_) => unlocked,
		}
	}
}

impl std::fmt::Debug for AccountSigner {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Local(s) => f
				.debug_struct("AccountSigner::Local")
				.field("address", &Signer::address(s))
				.finish_non_exhaustive(),
			Self::Unlocked(address) => f
				.debug_tuple("AccountSigner::Unlocked")
				.field(address)
				.finish(),
		}
	}
}
