use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use hybrid_seek::app_dirs;

use crate::cli::CliArgs;

/// Prefix of environment variables such as `HSEEK__SEARCH__RESULT_LIMIT`.
pub(super) const ENV_PREFIX: &str = "hseek";

/// Layer order, lowest precedence first: default files, `--config` files,
/// then `HSEEK__*` environment variables. CLI flags are applied afterwards on
/// the deserialized sections.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
	let defaults = if cli.no_config {
		Vec::new()
	} else {
		default_config_files()
	};

	let optional = defaults
		.into_iter()
		.map(|path| File::from(path).required(false));
	let explicit = cli
		.config
		.iter()
		.map(|path| File::from(path.as_path()).required(true));

	let environment = Environment::with_prefix(ENV_PREFIX)
		.separator("__")
		.try_parsing(true)
		.list_separator(",")
		.with_list_parse_key("search.priority_dirs");

	optional
		.chain(explicit)
		.fold(Config::builder(), |builder, file| builder.add_source(file))
		.add_source(environment)
		.build()
		.context("failed to assemble configuration layers")
}

/// Candidate files in the user config directory and the working directory.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let config_dir = app_dirs::get_config_dir()
		.ok()
		.map(|dir| dir.join("config.toml"));
	let local = env::current_dir()
		.ok()
		.into_iter()
		.flat_map(|cwd| [cwd.join(".hseek.toml"), cwd.join("hseek.toml")]);

	config_dir.into_iter().chain(local).collect()
}
