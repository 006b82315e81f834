//! Artifact fixtures shared by the unit tests.

use std::path::Path;

/// ABI of a contract whose constructor takes the owner address.
pub const OWNER_CONSTRUCTOR: &str = r#"[
	{
		"type": "constructor",
		"stateMutability": "nonpayable",
		"inputs": [{ "name": "initialOwner", "type": "address", "internalType": "address" }]
	},
	{
		"type": "function",
		"name": "owner",
		"stateMutability": "view",
		"inputs": [],
		"outputs": [{ "name": "", "type": "address", "internalType": "address" }]
	}
]"#;

/// Hardhat layout: `bytecode` is a hex string.
pub fn hardhat_artifact(name: &str) -> String {
	format!(
		r#"{{
	"_format": "hh-sol-artifact-1",
	"contractName": "{name}",
	"sourceName": "contracts/{name}.sol",
	"abi": {OWNER_CONSTRUCTOR},
	"bytecode": "0x6080604052",
	"deployedBytecode": "0x6080",
	"linkReferences": {{}},
	"deployedLinkReferences": {{}}
}}"#
	)
}

/// Foundry layout: `bytecode.object` holds the hex string.
pub fn foundry_artifact() -> String {
	format!(
		r#"{{
	"abi": {OWNER_CONSTRUCTOR},
	"bytecode": {{ "object": "0x6080604052", "linkReferences": {{}} }},
	"deployedBytecode": {{ "object": "0x6080", "linkReferences": {{}} }}
}}"#
	)
}

/// Writes `<root>/<subdir>/<name>.sol/<name>.json`.
pub fn write_artifact(root: &Path, subdir: &str, name: &str, content: &str) {
	let dir = root.join(subdir).join(format!("{name}.sol"));
	std::fs::create_dir_all(&dir).unwrap();
	std::fs::write(dir.join(format!("{name}.json")), content).unwrap();
}
