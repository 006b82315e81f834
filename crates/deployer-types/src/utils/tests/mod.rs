//! Test builders for deployer types
//!
//! This module provides fluent builder APIs for constructing receipts and
//! transactions with sensible defaults for TESTING purposes.
pub mod builders;
