use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::index::IndexConnection;

/// How the external index takes part in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexMode {
	/// Home is indexed as-is.
	Direct,
	/// Home is indexed under the mount marker; reported paths are stripped.
	Rewritten,
	/// Neither form of home is indexed.
	Unavailable,
	/// No index connection was configured.
	Disabled,
}

impl IndexMode {
	/// Whether the external phase runs.
	#[must_use]
	pub fn is_enabled(self) -> bool {
		matches!(self, IndexMode::Direct | IndexMode::Rewritten)
	}
}

impl fmt::Display for IndexMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			IndexMode::Direct => "direct",
			IndexMode::Rewritten => "rewritten",
			IndexMode::Unavailable => "unavailable",
			IndexMode::Disabled => "disabled",
		})
	}
}

/// Root a query walks, and how its paths are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoot {
	root: PathBuf,
	strip_prefix: Option<PathBuf>,
	mode: IndexMode,
}

impl SearchRoot {
	/// Probe the index for `home`, falling back to `mount_marker + home`.
	///
	/// The fallback is only taken when the rewritten directory exists
	/// locally; every other outcome keeps `home` as the root.
	pub fn resolve(home: &Path, mount_marker: &Path, index: Option<&IndexConnection>) -> Self {
		let unchanged = |mode| Self {
			root: home.to_path_buf(),
			strip_prefix: None,
			mode,
		};

		let Some(index) = index else {
			debug!("no index connection; external phase disabled");
			return unchanged(IndexMode::Disabled);
		};

		if index.has_index(home) {
			return unchanged(IndexMode::Direct);
		}

		let rewritten = rewrite_under(mount_marker, home);
		if rewritten.is_dir() && index.has_index(&rewritten) {
			debug!(root = %rewritten.display(), "home indexed under mount marker");
			return Self {
				root: rewritten,
				strip_prefix: Some(mount_marker.to_path_buf()),
				mode: IndexMode::Rewritten,
			};
		}

		warn!(home = %home.display(), "home is not indexed; searching locally only");
		unchanged(IndexMode::Unavailable)
	}

	/// Root without index involvement.
	#[must_use]
	pub fn local(home: impl Into<PathBuf>) -> Self {
		Self {
			root: home.into(),
			strip_prefix: None,
			mode: IndexMode::Disabled,
		}
	}

	/// Directory walked on disk.
	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Index participation.
	#[must_use]
	pub fn mode(&self) -> IndexMode {
		self.mode
	}

	/// Whether the external phase runs.
	#[must_use]
	pub fn uses_index(&self) -> bool {
		self.mode.is_enabled()
	}

	/// Render an on-disk path the way it is reported to the consumer.
	///
	/// Under [`IndexMode::Rewritten`] the mount marker is removed component
	/// by component, so `/data/home/u/a.txt` becomes `/home/u/a.txt` while
	/// `/database/a.txt` is left alone.
	#[must_use]
	pub fn report_path(&self, path: &Path) -> String {
		if let Some(prefix) = &self.strip_prefix
			&& let Ok(rest) = path.strip_prefix(prefix)
		{
			return Path::new("/").join(rest).to_string_lossy().into_owned();
		}
		path.to_string_lossy().into_owned()
	}
}

fn rewrite_under(marker: &Path, home: &Path) -> PathBuf {
	let relative: PathBuf = home
		.components()
		.filter(|component| matches!(component, Component::Normal(_)))
		.collect();
	marker.join(relative)
}
