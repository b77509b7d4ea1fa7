use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

/// `[index]` table as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(in crate::settings) struct IndexSection {
	pub(in crate::settings) snapshot: Option<PathBuf>,
}

impl IndexSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(snapshot) = cli.index_snapshot.clone() {
			self.snapshot = Some(snapshot);
		}
	}

	pub(super) fn resolve(self) -> Result<Option<PathBuf>> {
		let Some(snapshot) = self.snapshot else {
			return Ok(None);
		};
		if snapshot.is_absolute() {
			return Ok(Some(snapshot));
		}
		let cwd = env::current_dir().context("failed to resolve current directory for snapshot")?;
		Ok(Some(cwd.join(snapshot)))
	}
}
