//! Main binary entry point for the contract deployer
//!
//! Loads `.env`, parses arguments, sets up logging and runs a single
//! deployment. Any failure is printed on stderr and turns into exit code 1.

use clap::Parser;
use deployer_cli::cli::{output::Display, Cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
	// Load environment variables from .env file if it exists
	let _ = dotenvy::dotenv();

	let cli = Cli::parse();
	init_logging(&cli.log_level);

	match deployer_cli::run(cli).await {
		Ok(_) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::debug!(error = ?err, "Deployment failed");
			Display::error(&format!("{:#}", err));
			ExitCode::FAILURE
		},
	}
}

/// Initialize structured logging on stderr
///
/// RUST_LOG takes precedence over `--log-level`; stdout is left to the
/// deployment progress lines.
fn init_logging(level: &str) {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

	let env_filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(level))
		.unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_writer(std::io::stderr)
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.init();
}
