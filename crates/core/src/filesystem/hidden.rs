use std::collections::{HashMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-directory list of names a file manager hides from the user.
pub const HIDDEN_LIST_FILE: &str = ".hidden";

/// Decides whether a candidate is hidden from the user.
///
/// Implementations may use the query-local [`HiddenCache`] to avoid reading
/// the same per-directory configuration twice.
pub trait HiddenPolicy: Send + Sync {
	/// Whether `path`, located below `root`, should be filtered out.
	fn is_hidden(&self, path: &Path, root: &Path, cache: &mut HiddenCache) -> bool;
}

/// Lazily populated `directory -> excluded names` map.
#[derive(Debug, Default)]
pub struct HiddenCache {
	excluded: HashMap<PathBuf, HashSet<OsString>>,
}

impl HiddenCache {
	/// Create an empty cache.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Names listed in `directory`'s hidden list, loading it on first use.
	///
	/// A missing or unreadable list is cached as empty.
	pub fn excluded(&mut self, directory: &Path) -> &HashSet<OsString> {
		self.excluded
			.entry(directory.to_path_buf())
			.or_insert_with(|| load_hidden_list(directory))
	}

	/// Number of directories consulted so far.
	#[must_use]
	pub fn len(&self) -> usize {
		self.excluded.len()
	}

	/// Whether no directory has been consulted yet.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.excluded.is_empty()
	}
}

fn load_hidden_list(directory: &Path) -> HashSet<OsString> {
	let Ok(contents) = fs::read_to_string(directory.join(HIDDEN_LIST_FILE)) else {
		return HashSet::new();
	};

	contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(OsString::from)
		.collect()
}

/// File-manager hiding rules.
///
/// A path strictly below `root` is hidden when it, or any ancestor below
/// `root`, starts with a dot or is listed in its parent directory's
/// [`HIDDEN_LIST_FILE`]. Paths outside `root`, and `root` itself, are never
/// hidden.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotHiddenPolicy;

impl HiddenPolicy for DotHiddenPolicy {
	fn is_hidden(&self, path: &Path, root: &Path, cache: &mut HiddenCache) -> bool {
		if !path.starts_with(root) {
			return false;
		}

		let mut current = path;
		while current != root {
			let (Some(name), Some(parent)) = (current.file_name(), current.parent()) else {
				break;
			};
			if is_dot_name(name) || cache.excluded(parent).contains(name) {
				return true;
			}
			current = parent;
		}

		false
	}
}

fn is_dot_name(name: &OsStr) -> bool {
	name.as_encoded_bytes().first() == Some(&b'.')
}
