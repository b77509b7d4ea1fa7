use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use regex::RegexBuilder;
use serde::Deserialize;
use tracing::debug;

use super::{IndexService, PagedQuery, PagedReply, PaginationCursor};
use crate::error::{IndexError, SnapshotError};

/// On-disk layout of an index snapshot.
#[derive(Debug, Deserialize)]
struct Snapshot {
	#[serde(default)]
	roots: Vec<PathBuf>,
	paths: Vec<String>,
}

/// In-process index backed by a fixed list of paths.
///
/// Stands in for the daemon in tests and when the CLI is pointed at a JSON
/// snapshot (`{"roots": [...], "paths": [...]}`). A directory counts as
/// indexed when it lies below one of the roots.
#[derive(Debug)]
pub struct MemoryIndex {
	roots: Vec<PathBuf>,
	paths: Vec<String>,
	auto_index: AtomicBool,
}

impl MemoryIndex {
	/// Index `paths` and report every directory below `roots` as covered.
	pub fn new(
		roots: impl IntoIterator<Item = PathBuf>,
		paths: impl IntoIterator<Item = String>,
	) -> Self {
		Self {
			roots: roots.into_iter().collect(),
			paths: paths.into_iter().collect(),
			auto_index: AtomicBool::new(false),
		}
	}

	/// Load a snapshot file.
	///
	/// # Errors
	///
	/// Returns [`SnapshotError`] when the file cannot be read or parsed.
	pub fn load_snapshot(path: &Path) -> Result<Self, SnapshotError> {
		let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let snapshot: Snapshot =
			serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
				path: path.to_path_buf(),
				source,
			})?;
		debug!(
			snapshot = %path.display(),
			roots = snapshot.roots.len(),
			paths = snapshot.paths.len(),
			"loaded index snapshot"
		);
		Ok(Self::new(snapshot.roots, snapshot.paths))
	}

	/// Number of indexed paths.
	#[must_use]
	pub fn len(&self) -> usize {
		self.paths.len()
	}

	/// Whether the index holds no paths.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.paths.is_empty()
	}
}

impl IndexService for MemoryIndex {
	fn has_index(&self, path: &Path) -> bool {
		self.roots.iter().any(|root| path.starts_with(root))
	}

	fn auto_index_internal(&self) -> Result<bool, IndexError> {
		Ok(self.auto_index.load(Ordering::Relaxed))
	}

	fn set_auto_index_internal(&self, enabled: bool) -> Result<(), IndexError> {
		self.auto_index.store(enabled, Ordering::Relaxed);
		Ok(())
	}

	fn paged_search(&self, query: &PagedQuery<'_>) -> Result<PagedReply, IndexError> {
		let rules = query.rules;
		let source = if rules.use_regex {
			query.pattern.to_owned()
		} else {
			regex::escape(query.pattern)
		};
		let regex = RegexBuilder::new(&source)
			.case_insensitive(rules.case_insensitive)
			.build()
			.map_err(|err| IndexError::Service {
				directory: query.directory.to_path_buf(),
				message: err.to_string(),
			})?;

		let matches: Vec<&String> = self
			.paths
			.iter()
			.filter(|path| {
				let Ok(relative) = Path::new(path.as_str()).strip_prefix(query.directory) else {
					return false;
				};
				if relative.as_os_str().is_empty() {
					return false;
				}
				if rules.exclude_hidden && has_dot_component(relative) {
					return false;
				}
				relative
					.file_name()
					.is_some_and(|name| regex.is_match(&name.to_string_lossy()))
			})
			.collect();

		let total = u32::try_from(matches.len()).unwrap_or(u32::MAX);
		let start = query.cursor.start.min(total);
		let stop = start.saturating_add(rules.max_results).min(total);
		let paths = matches[start as usize..stop as usize]
			.iter()
			.map(|path| (*path).clone())
			.collect();

		Ok(PagedReply {
			paths,
			cursor: PaginationCursor::new(stop, total),
		})
	}
}

fn has_dot_component(path: &Path) -> bool {
	path.components().any(|component| match component {
		Component::Normal(name) => name.as_encoded_bytes().first() == Some(&b'.'),
		_ => false,
	})
}
