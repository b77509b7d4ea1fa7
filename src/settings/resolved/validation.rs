use super::{ConfigError, ConfigSources, ResolvedConfig, Setting};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if config.search.result_limit == 0 {
		return Err(ConfigError::invalid(
			Setting::ResultLimit.key(),
			"0",
			sources.origin(Setting::ResultLimit),
			"must be greater than zero",
		));
	}

	if config.search.push_interval.is_zero() {
		return Err(ConfigError::invalid(
			Setting::PushInterval.key(),
			"0",
			sources.origin(Setting::PushInterval),
			"must be at least 1",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use hybrid_seek_core::SearchOptions;

	use super::super::SettingSource;
	use super::*;

	fn config(search: SearchOptions) -> ResolvedConfig {
		ResolvedConfig {
			search,
			index_snapshot: None,
		}
	}

	#[test]
	fn defaults_are_valid() {
		let config = config(SearchOptions::for_home("/home/u"));
		assert!(validate(&config, &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_limit() {
		let config = config(SearchOptions {
			result_limit: 0,
			..SearchOptions::for_home("/home/u")
		});
		let mut sources = ConfigSources::default();
		sources.record(SettingSource::CliFlag(Setting::ResultLimit));

		let err = validate(&config, &sources).unwrap_err();
		assert!(matches!(err.key, "search.result_limit"));
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("CLI flag"));
	}

	#[test]
	fn validation_rejects_zero_interval() {
		let config = config(SearchOptions {
			push_interval: Duration::ZERO,
			..SearchOptions::for_home("/home/u")
		});
		let mut sources = ConfigSources::default();
		sources.record(SettingSource::Environment(Setting::PushInterval));

		let err = validate(&config, &sources).unwrap_err();
		assert!(matches!(err.key, "search.push_interval_ms"));
		assert!(err.to_string().contains("environment variable"));
	}
}
