use std::env;

use anyhow::{Error, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, Setting, SettingSource};

mod index;
mod search;

use index::IndexSection;
use search::SearchSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	pub(super) search: SearchSection,
	pub(super) index: IndexSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.search.apply_cli_overrides(cli);
		self.index.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let mut sources = ConfigSources::default();
		let tracked = [
			(
				Setting::ResultLimit,
				cli.limit.is_some(),
				self.search.result_limit.is_some(),
			),
			(
				Setting::PushInterval,
				cli.push_interval_ms.is_some(),
				self.search.push_interval_ms.is_some(),
			),
		];
		for (setting, from_cli, present) in tracked {
			if let Some(source) = detect_source(setting, from_cli, present) {
				sources.record(source);
			}
		}

		let config = ResolvedConfig {
			search: self.search.resolve()?,
			index_snapshot: self.index.resolve()?,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(setting: Setting, from_cli: bool, present: bool) -> Option<SettingSource> {
	if !present {
		return None;
	}

	if from_cli {
		return Some(SettingSource::CliFlag(setting));
	}

	if env::var_os(setting.env_var()).is_some() {
		return Some(SettingSource::Environment(setting));
	}

	Some(SettingSource::ConfigFile(setting))
}
