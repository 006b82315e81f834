//! Builders for configuration values used in tests and tooling.

pub mod config;
