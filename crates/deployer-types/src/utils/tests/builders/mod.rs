//! Fluent builders for delivery types.

pub mod deployment_receipt;

pub use deployment_receipt::DeploymentReceiptBuilder;
