//! Common types module for the contract deployer.
//!
//! This module defines the data types shared between the account, delivery,
//! configuration and deployment crates, so that each of them can depend on a
//! single leaf crate instead of on one another.

/// Transaction delivery types for contract creation.
pub mod delivery;
/// Network configuration types.
pub mod networks;
/// Utility functions for hex formatting and test builders.
pub mod utils;

pub use delivery::{DeploymentReceipt, DeploymentTransaction};
pub use networks::{
	AccountSource, NetworkConfig, NetworksConfig, DEFAULT_CONFIRMATIONS,
	DEFAULT_CONFIRMATION_TIMEOUT_SECONDS, LOCALHOST_NETWORK, LOCALHOST_RPC_URL,
};
pub use utils::{short_hash, without_0x_prefix};
