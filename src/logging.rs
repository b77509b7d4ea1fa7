//! Diagnostic output for the command line front end.
//!
//! Logs go to stderr so stdout stays reserved for results.

use std::io;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "debug";

/// Install the global subscriber.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` is honored when
/// set, falling back to warnings only.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn initialize(verbose: bool) -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(filter(verbose))
		.with_writer(io::stderr)
		.with_target(false)
		.try_init()
		.map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}

fn filter(verbose: bool) -> EnvFilter {
	if verbose {
		return EnvFilter::new(VERBOSE_DIRECTIVE);
	}
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}
