use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use hybrid_seek_core::SearchOptions;
use serde::Deserialize;

use crate::cli::CliArgs;

/// `[search]` table as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(in crate::settings) struct SearchSection {
	pub(in crate::settings) root: Option<PathBuf>,
	pub(in crate::settings) result_limit: Option<usize>,
	pub(in crate::settings) push_interval_ms: Option<u64>,
	pub(in crate::settings) mount_marker: Option<PathBuf>,
	pub(in crate::settings) priority_dirs: Option<Vec<String>>,
	pub(in crate::settings) include_hidden: Option<bool>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(root) = cli.root.clone() {
			self.root = Some(root);
		}
		if let Some(limit) = cli.limit {
			self.result_limit = Some(limit);
		}
		if let Some(interval) = cli.push_interval_ms {
			self.push_interval_ms = Some(interval);
		}
		if let Some(marker) = cli.mount_marker.clone() {
			self.mount_marker = Some(marker);
		}
		if let Some(hidden) = cli.hidden {
			self.include_hidden = Some(hidden);
		}
	}

	/// Fill defaults. The root is made absolute but not required to exist:
	/// a missing home is searched as empty.
	pub(super) fn resolve(self) -> Result<SearchOptions> {
		let defaults = SearchOptions::default();

		let mut home = match self.root {
			Some(path) => path,
			None => dirs::home_dir().context("failed to determine the home directory")?,
		};
		if home.is_relative() {
			home = env::current_dir()
				.context("failed to resolve current directory for root")?
				.join(home);
		}

		let priority_dirs = self
			.priority_dirs
			.map(sanitize_names)
			.unwrap_or(defaults.priority_dirs);

		Ok(SearchOptions {
			home,
			result_limit: self.result_limit.unwrap_or(defaults.result_limit),
			push_interval: self
				.push_interval_ms
				.map_or(defaults.push_interval, Duration::from_millis),
			mount_marker: self.mount_marker.unwrap_or(defaults.mount_marker),
			priority_dirs,
			include_hidden: self.include_hidden.unwrap_or(defaults.include_hidden),
			rules: defaults.rules,
		})
	}
}

/// Trim names and drop blanks and repeats, keeping first occurrences.
fn sanitize_names(names: Vec<String>) -> Vec<String> {
	let mut cleaned: Vec<String> = Vec::new();
	for name in names {
		let name = name.trim();
		if !name.is_empty() && !cleaned.iter().any(|seen| seen == name) {
			cleaned.push(name.to_string());
		}
	}
	cleaned
}
