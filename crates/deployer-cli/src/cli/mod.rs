//! Command-line interface definitions and parsing
//!
//! The deployer has a single command; every flag has a default so that a
//! bare `deploy` targets the local development node.

pub mod output;

use clap::Parser;
use std::path::PathBuf;

/// Deploy a contract whose constructor takes its owner address.
#[derive(Parser, Debug)]
#[command(name = "deploy")]
#[command(about = "Deploy the Antrix contract to an EVM network")]
#[command(version)]
pub struct Cli {
	/// Network to deploy to
	#[arg(long, env = "DEPLOY_NETWORK", default_value = "localhost")]
	pub network: String,

	/// Configuration file; built-in defaults are used when it does not exist
	#[arg(long, env = "DEPLOY_CONFIG", default_value = "deploy.toml")]
	pub config: PathBuf,

	/// Contract to deploy, overriding the configuration
	#[arg(long)]
	pub contract: Option<String>,

	/// Write the deployed address and the contract artifact to this directory
	#[arg(long, value_name = "DIR")]
	pub save_dir: Option<PathBuf>,

	/// List the contracts found in the artifact directory and exit
	#[arg(long)]
	pub list: bool,

	/// Log filter used when RUST_LOG is not set
	#[arg(long, default_value = "warn")]
	pub log_level: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn test_cli_definition() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_cli_flags() {
		let cli = Cli::try_parse_from([
			"deploy",
			"--network",
			"sepolia",
			"--config",
			"conf/deploy.toml",
			"--contract",
			"Vault",
			"--save-dir",
			"deployments",
			"--log-level",
			"debug",
		])
		.unwrap();

		assert_eq!(cli.network, "sepolia");
		assert_eq!(cli.config, PathBuf::from("conf/deploy.toml"));
		assert_eq!(cli.contract.as_deref(), Some("Vault"));
		assert_eq!(cli.save_dir, Some(PathBuf::from("deployments")));
		assert_eq!(cli.log_level, "debug");
		assert!(!cli.list);
	}

	#[test]
	fn test_cli_rejects_unknown_flag() {
		assert!(Cli::try_parse_from(["deploy", "--retries", "3"]).is_err());
	}
}
