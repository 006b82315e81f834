//! Utility functions for hex formatting.
//!
//! The `tests` submodule holds builders used by the test suites of the other
//! workspace crates; it is compiled for this crate's own tests and behind the
//! `testing` feature.

pub mod formatting;

#[cfg(any(test, feature = "testing"))]
pub mod tests;

pub use formatting::{short_hash, without_0x_prefix};
