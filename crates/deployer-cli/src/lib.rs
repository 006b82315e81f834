//! Command-line front-end of the contract deployer.
//!
//! [`run`] performs one invocation: it loads the configuration, then either
//! lists the available artifacts or deploys the configured contract and
//! optionally saves the result.

pub mod cli;

use anyhow::{Context, Result};
use cli::{output::Display, Cli};
use deployer_config::Config;
use deployer_core::{
	build_deployer, ArtifactStore, ArtifactWriter, DeployedContract, DeploymentRequest,
};

/// Runs the command described by the parsed arguments.
pub async fn run(cli: Cli) -> Result<Option<DeployedContract>> {
	let config = Config::load_or_default(&cli.config)
		.await
		.with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

	if cli.list {
		list_artifacts(&ArtifactStore::new(&config.artifacts_dir)).await?;
		return Ok(None);
	}

	let contract = cli.contract.clone().unwrap_or_else(|| config.contract.clone());
	let deployer = build_deployer(&config, &cli.network)?;
	let request = DeploymentRequest::from_env(contract, config.owner_env.clone());

	let deployed = deployer.deploy(&request, Display::event).await?;

	if let Some(dir) = &cli.save_dir {
		let artifact = deployer.artifacts().load(&deployed.contract).await?;
		let saved = ArtifactWriter::new(dir)
			.save(&cli.network, &deployed, &artifact)
			.await
			.with_context(|| format!("Failed to save deployment to {}", dir.display()))?;
		Display::info(&format!(
			"Saved {} and {}",
			saved.address_file.display(),
			saved.artifact_file.display()
		));
	}

	Ok(Some(deployed))
}

async fn list_artifacts(store: &ArtifactStore) -> Result<()> {
	let names = store.list().await?;
	if names.is_empty() {
		Display::warning(&format!(
			"No contract artifacts found in {}",
			store.root().display()
		));
		return Ok(());
	}

	Display::header(&format!("Contracts in {}", store.root().display()));
	for name in names {
		println!("  {}", name);
	}
	Ok(())
}
