//! Persistence of deployment results.
//!
//! Front-ends and scripts pick up deployed addresses from
//! `contract-address-<network>.json` and the ABI from `<Contract>.json`,
//! both written next to each other in a chosen directory.

use crate::{ContractArtifact, DeployedContract};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while saving deployment files.
#[derive(Debug, Error)]
pub enum WriteError {
	/// Error that occurs during file I/O operations.
	#[error("Failed to write {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	/// An existing address file could not be merged.
	#[error("Cannot update {path}: {reason}")]
	InvalidAddressFile { path: String, reason: String },
	/// Error that occurs when serializing the output.
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

fn io_error(path: &Path, source: std::io::Error) -> WriteError {
	WriteError::Io {
		path: path.display().to_string(),
		source,
	}
}

/// Files written by [`ArtifactWriter::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFiles {
	pub address_file: PathBuf,
	pub artifact_file: PathBuf,
}

/// Writes deployment addresses and contract artifacts to a directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
	dir: PathBuf,
}

impl ArtifactWriter {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	/// Path of the address file for a network.
	pub fn address_file(&self, network: &str) -> PathBuf {
		self.dir.join(format!("contract-address-{}.json", network))
	}

	/// Path of the saved artifact for a contract.
	pub fn artifact_file(&self, contract: &str) -> PathBuf {
		self.dir.join(format!("{}.json", contract))
	}

	/// Records the deployed address and saves the contract artifact.
	///
	/// Addresses of other contracts already present in the network's address
	/// file are kept.
	pub async fn save(
		&self,
		network: &str,
		deployed: &DeployedContract,
		artifact: &ContractArtifact,
	) -> Result<SavedFiles, WriteError> {
		tokio::fs::create_dir_all(&self.dir)
			.await
			.map_err(|e| io_error(&self.dir, e))?;

		let address_file = self.address_file(network);
		let mut addresses = read_address_file(&address_file).await?;
		addresses.insert(
			deployed.contract.clone(),
			Value::String(deployed.address.to_checksum(None)),
		);
		write_pretty(&address_file, &Value::Object(addresses)).await?;

		let artifact_file = self.artifact_file(&deployed.contract);
		write_pretty(&artifact_file, &artifact.raw).await?;

		tracing::info!(
			address_file = %address_file.display(),
			artifact_file = %artifact_file.display(),
			"Saved deployment files"
		);

		Ok(SavedFiles {
			address_file,
			artifact_file,
		})
	}
}

async fn read_address_file(path: &Path) -> Result<Map<String, Value>, WriteError> {
	let content = match tokio::fs::read_to_string(path).await {
		Ok(content) => content,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
		Err(e) => return Err(io_error(path, e)),
	};

	match serde_json::from_str(&content) {
		Ok(Value::Object(map)) => Ok(map),
		Ok(_) => Err(WriteError::InvalidAddressFile {
			path: path.display().to_string(),
			reason: "expected a JSON object".to_string(),
		}),
		Err(e) => Err(WriteError::InvalidAddressFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		}),
	}
}

async fn write_pretty(path: &Path, value: &Value) -> Result<(), WriteError> {
	let mut content = serde_json::to_string_pretty(value)?;
	content.push('\n');
	tokio::fs::write(path, content)
		.await
		.map_err(|e| io_error(path, e))
}
