//! String formatting utilities.
//!
//! Hex prefix handling for private keys read from configuration, and
//! shortening of hashes for log lines.

use alloy_primitives::{hex, B256};

/// Removes "0x" prefix from a hex string if present.
///
/// Both "0x" and "0X" are accepted, matching what compilers and wallets emit.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}

/// Shortens a transaction hash to `0x` plus its first 8 hex digits.
pub fn short_hash(hash: &B256) -> String {
	let full = hex::encode_prefixed(hash);
	format!("{}..", &full[..10])
}
