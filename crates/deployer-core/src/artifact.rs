//! Compiler artifact lookup.
//!
//! Both Hardhat (`artifacts/contracts/<Name>.sol/<Name>.json`) and Foundry
//! (`out/<Name>.sol/<Name>.json`) place one JSON file per contract in a
//! directory named after its source file. Hardhat stores the creation code as
//! a hex string under `bytecode`, Foundry under `bytecode.object`.

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{hex, Address, Bytes};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Directory holding Hardhat's compiler inputs and outputs, not contracts.
const BUILD_INFO_DIR: &str = "build-info";

/// Deepest nesting searched below the artifact directory.
const MAX_DEPTH: usize = 16;

/// Errors that can occur while resolving an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
	/// No artifact with this contract name exists.
	#[error("no artifact named '{name}' under {dir}")]
	NotFound { name: String, dir: String },
	/// The artifact exists but cannot be used for a deployment.
	#[error("{path}: {reason}")]
	Invalid { path: String, reason: String },
}

impl ArtifactError {
	fn invalid(path: &Path, reason: impl Into<String>) -> Self {
		Self::Invalid {
			path: path.display().to_string(),
			reason: reason.into(),
		}
	}
}

/// A deployable contract read from compiler output.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
	/// Contract name, as used on the command line.
	pub contract_name: String,
	/// Contract ABI.
	pub abi: JsonAbi,
	/// Creation bytecode.
	pub bytecode: Bytes,
	/// File the artifact was read from.
	pub source: PathBuf,
	/// The artifact as found on disk.
	pub raw: Value,
}

impl ContractArtifact {
	/// Parses an artifact and checks that it can be deployed with a single
	/// owner address as constructor argument.
	pub fn from_json(name: &str, source: &Path, content: &str) -> Result<Self, ArtifactError> {
		let raw: Value = serde_json::from_str(content)
			.map_err(|e| ArtifactError::invalid(source, format!("invalid JSON: {}", e)))?;

		let bytecode = extract_bytecode(&raw).map_err(|reason| ArtifactError::invalid(source, reason))?;

		let abi_value = raw
			.get("abi")
			.cloned()
			.ok_or_else(|| ArtifactError::invalid(source, "no ABI found"))?;
		let abi: JsonAbi = serde_json::from_value(abi_value)
			.map_err(|e| ArtifactError::invalid(source, format!("invalid ABI: {}", e)))?;

		check_owner_constructor(&abi).map_err(|reason| ArtifactError::invalid(source, reason))?;

		Ok(Self {
			contract_name: name.to_string(),
			abi,
			bytecode,
			source: source.to_path_buf(),
			raw,
		})
	}

	/// Creation bytecode followed by the ABI-encoded owner address.
	pub fn deployment_data(&self, owner: Address) -> Result<Bytes, ArtifactError> {
		let args = DynSolValue::Tuple(vec![DynSolValue::Address(owner)])
			.abi_encode_sequence()
			.ok_or_else(|| {
				ArtifactError::invalid(&self.source, "failed to encode constructor arguments")
			})?;

		let mut data = self.bytecode.to_vec();
		data.extend_from_slice(&args);
		Ok(Bytes::from(data))
	}
}

/// Extract bytecode from contract JSON
fn extract_bytecode(raw: &Value) -> Result<Bytes, String> {
	let bytecode = raw.get("bytecode").ok_or("no bytecode found")?;
	let hex_str = bytecode
		.as_str()
		.or_else(|| bytecode.get("object").and_then(Value::as_str))
		.ok_or("bytecode is neither a hex string nor an object with one")?;

	// Placeholders look like `__$<hash>$__`; valid hex never contains `_`.
	if hex_str.contains('_') {
		return Err("bytecode references unlinked libraries".to_string());
	}

	let bytes = hex::decode(hex_str).map_err(|e| format!("invalid bytecode hex: {}", e))?;
	if bytes.is_empty() {
		return Err("bytecode is empty (abstract contract or interface)".to_string());
	}

	Ok(Bytes::from(bytes))
}

fn check_owner_constructor(abi: &JsonAbi) -> Result<(), String> {
	let inputs = abi
		.constructor
		.as_ref()
		.map(|c| c.inputs.as_slice())
		.unwrap_or_default();

	match inputs {
		[param] => {
			let ty = param
				.resolve()
				.map_err(|e| format!("unsupported constructor parameter: {}", e))?;
			if ty == DynSolType::Address {
				Ok(())
			} else {
				Err(format!(
					"constructor parameter must be an address, found {}",
					param.ty
				))
			}
		},
		_ => Err(format!(
			"constructor must take exactly one address, found {} parameters",
			inputs.len()
		)),
	}
}

/// Lookup of contract artifacts below a directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
	root: PathBuf,
}

impl ArtifactStore {
	/// Creates a store rooted at the given artifact directory.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// The artifact directory.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Loads the artifact of a contract by name.
	///
	/// A name defined by more than one source file is ambiguous and refused.
	pub async fn load(&self, name: &str) -> Result<ContractArtifact, ArtifactError> {
		let mut candidates: Vec<PathBuf> = self
			.artifact_files()
			.await?
			.into_iter()
			.filter(|(contract, _)| contract == name)
			.map(|(_, path)| path)
			.collect();

		let path = match candidates.len() {
			0 => {
				return Err(ArtifactError::NotFound {
					name: name.to_string(),
					dir: self.root.display().to_string(),
				})
			},
			1 => candidates.remove(0),
			_ => {
				candidates.sort();
				let paths: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
				return Err(ArtifactError::invalid(
					&self.root,
					format!("'{}' is defined by several sources: {}", name, paths.join(", ")),
				));
			},
		};

		let content = tokio::fs::read_to_string(&path)
			.await
			.map_err(|e| ArtifactError::invalid(&path, format!("failed to read: {}", e)))?;

		let artifact = ContractArtifact::from_json(name, &path, &content)?;
		tracing::debug!(
			contract = name,
			path = %path.display(),
			bytecode_len = artifact.bytecode.len(),
			"Loaded contract artifact"
		);
		Ok(artifact)
	}

	/// Names of all contracts found in the artifact directory, sorted.
	pub async fn list(&self) -> Result<Vec<String>, ArtifactError> {
		let mut names: Vec<String> = self
			.artifact_files()
			.await?
			.into_iter()
			.map(|(name, _)| name)
			.collect();
		names.sort();
		names.dedup();
		Ok(names)
	}

	/// Collects `<Source>.sol/<Name>.json` files below the artifact directory.
	async fn artifact_files(&self) -> Result<Vec<(String, PathBuf)>, ArtifactError> {
		let root = self.root.clone();
		tokio::task::spawn_blocking(move || walk_artifacts(&root))
			.await
			.map_err(|e| {
				ArtifactError::invalid(&self.root, format!("directory walk failed: {}", e))
			})?
	}
}

/// Walks `root` without following symbolic links, skipping `build-info`.
///
/// A missing directory yields no artifacts.
fn walk_artifacts(root: &Path) -> Result<Vec<(String, PathBuf)>, ArtifactError> {
	let mut found = Vec::new();
	if !root.is_dir() {
		return Ok(found);
	}

	let walker = WalkDir::new(root)
		.max_depth(MAX_DEPTH)
		.into_iter()
		.filter_entry(|entry| entry.depth() == 0 || entry.file_name() != BUILD_INFO_DIR);

	for entry in walker {
		let entry = entry.map_err(|e| {
			ArtifactError::invalid(
				e.path().unwrap_or(root),
				format!("failed to read directory: {}", e),
			)
		})?;
		if !entry.file_type().is_file() {
			continue;
		}

		let Some(file_name) = entry.file_name().to_str() else {
			continue;
		};
		let in_source_dir = entry
			.path()
			.parent()
			.and_then(Path::extension)
			.is_some_and(|ext| ext == "sol");
		if !in_source_dir || file_name.ends_with(".dbg.json") {
			continue;
		}
		if let Some(name) = file_name.strip_suffix(".json") {
			found.push((name.to_string(), entry.into_path()));
		}
	}

	Ok(found)
}
