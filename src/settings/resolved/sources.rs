use std::fmt;

/// Settings whose origin is tracked so validation errors can point at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Setting {
	ResultLimit,
	PushInterval,
}

impl Setting {
	pub(crate) fn key(self) -> &'static str {
		match self {
			Self::ResultLimit => "search.result_limit",
			Self::PushInterval => "search.push_interval_ms",
		}
	}

	pub(crate) fn cli_flag(self) -> &'static str {
		match self {
			Self::ResultLimit => "--limit",
			Self::PushInterval => "--push-interval",
		}
	}

	pub(crate) fn env_var(self) -> &'static str {
		match self {
			Self::ResultLimit => "HSEEK__SEARCH__RESULT_LIMIT",
			Self::PushInterval => "HSEEK__SEARCH__PUSH_INTERVAL_MS",
		}
	}
}

/// Layer a setting value was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(Setting),
	Environment(Setting),
	ConfigFile(Setting),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			Self::CliFlag(setting) => write!(f, "CLI flag `{}`", setting.cli_flag()),
			Self::Environment(setting) => {
				write!(f, "environment variable `{}`", setting.env_var())
			}
			Self::ConfigFile(setting) => write!(f, "configuration key `{}`", setting.key()),
		}
	}
}

/// Origins recorded while resolving; anything unrecorded came from a file.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	recorded: Vec<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn record(&mut self, source: SettingSource) {
		self.recorded.push(source);
	}

	pub(crate) fn origin(&self, setting: Setting) -> SettingSource {
		self.recorded
			.iter()
			.copied()
			.find(|source| source.setting() == setting)
			.unwrap_or(SettingSource::ConfigFile(setting))
	}
}

impl SettingSource {
	fn setting(self) -> Setting {
		match self {
			Self::CliFlag(setting) | Self::Environment(setting) | Self::ConfigFile(setting) => {
				setting
			}
		}
	}
}
