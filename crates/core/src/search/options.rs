use std::path::PathBuf;
use std::time::Duration;

use hybrid_seek_stream::DEFAULT_PUSH_INTERVAL;

use crate::filesystem::PRIORITY_DIRECTORIES;
use crate::index::SearchRules;
use crate::results::DEFAULT_RESULT_LIMIT;

/// Prefix under which some systems expose home directories to the index.
pub const DEFAULT_MOUNT_MARKER: &str = "/data";

/// Tunables for a [`SearchOrchestrator`](super::SearchOrchestrator).
#[derive(Debug, Clone)]
pub struct SearchOptions {
	/// Directory searched locally and probed against the index.
	pub home: PathBuf,
	/// Ceiling on matches per query.
	pub result_limit: usize,
	/// Minimum gap between two non-empty pushes.
	pub push_interval: Duration,
	/// Alternate prefix tried when `home` itself is not indexed.
	pub mount_marker: PathBuf,
	/// Child names visited first, in order.
	pub priority_dirs: Vec<String>,
	/// Deliver hidden entries instead of filtering them.
	pub include_hidden: bool,
	/// Rules sent with every index call.
	pub rules: SearchRules,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self {
			home: dirs::home_dir().unwrap_or_default(),
			result_limit: DEFAULT_RESULT_LIMIT,
			push_interval: DEFAULT_PUSH_INTERVAL,
			mount_marker: PathBuf::from(DEFAULT_MOUNT_MARKER),
			priority_dirs: PRIORITY_DIRECTORIES.iter().map(|name| (*name).to_string()).collect(),
			include_hidden: false,
			rules: SearchRules::default(),
		}
	}
}

impl SearchOptions {
	/// Options rooted at `home` with every other value defaulted.
	#[must_use]
	pub fn for_home(home: impl Into<PathBuf>) -> Self {
		Self {
			home: home.into(),
			..Self::default()
		}
	}

	/// Rules actually sent to the index, honoring `include_hidden`.
	#[must_use]
	pub fn effective_rules(&self) -> SearchRules {
		SearchRules {
			exclude_hidden: self.rules.exclude_hidden && !self.include_hidden,
			..self.rules
		}
	}
}
