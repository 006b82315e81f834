//! Terminal output utilities and formatting
//!
//! Deployment progress goes to stdout as plain lines that scripts can match
//! on; errors go to stderr with a red cross.

use colored::Colorize;
use deployer_core::DeploymentEvent;

/// Terminal display utilities for formatted CLI output
pub struct Display;

impl Display {
	/// Displays a formatted section header with underline
	///
	/// # Arguments
	/// * `text` - Header text to display
	pub fn header(text: &str) {
		println!("\n{}", text.bold().cyan());
		println!("{}", "─".repeat(text.chars().count()).cyan());
	}

	/// Displays an error message with red X mark
	///
	/// # Arguments
	/// * `message` - Error message to display
	pub fn error(message: &str) {
		eprintln!("{} {}", "✗".red().bold(), message.red());
	}

	/// Displays a warning message with yellow warning symbol
	pub fn warning(message: &str) {
		println!("{} {}", "⚠".yellow().bold(), message.yellow());
	}

	/// Displays an informational message with blue info symbol
	pub fn info(message: &str) {
		println!("{} {}", "ℹ".blue().bold(), message);
	}

	/// Prints the progress line of a deployment event, if it has one.
	pub fn event(event: &DeploymentEvent) {
		if let Some(line) = event_line(event) {
			println!("{}", line);
		}
	}
}

/// Text printed for a deployment event.
///
/// Submission is only logged; the hash is not part of the progress output.
pub fn event_line(event: &DeploymentEvent) -> Option<String> {
	match event {
		DeploymentEvent::Started => Some("Deployment started!".to_string()),
		DeploymentEvent::SignerResolved { address } => Some(format!(
			"Deploying the contract with the account: {}",
			address
		)),
		DeploymentEvent::Submitted { .. } => None,
		DeploymentEvent::Deployed(deployed) => Some(format!(
			"{} deployed to {}",
			deployed.contract, deployed.address
		)),
	}
}
