use std::borrow::Cow;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::{Walk, WalkBuilder};
use tracing::debug;

/// Well-known home directory entries visited before everything else.
pub const PRIORITY_DIRECTORIES: [&str; 6] = [
	"Desktop",
	"Music",
	"Downloads",
	"Documents",
	"Pictures",
	"Videos",
];

/// Direct child of the search root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
	/// Absolute path of the entry.
	pub path: PathBuf,
	/// Whether the entry is a directory.
	pub is_dir: bool,
}

impl LocalEntry {
	/// Final path component, lossily decoded.
	#[must_use]
	pub fn file_name(&self) -> Cow<'_, str> {
		self.path
			.file_name()
			.map(OsStr::to_string_lossy)
			.unwrap_or_default()
	}
}

/// Enumerates the direct children of a root in priority order.
///
/// Children named in the priority list come first, in list order; the rest
/// follow in the order the filesystem reports them. Nothing is filtered
/// here: hidden entries and ignore files are left to the caller's policy.
#[derive(Debug, Clone)]
pub struct LocalTraverser {
	root: PathBuf,
	priority: Arc<[String]>,
}

impl LocalTraverser {
	/// Traverse `root` with the default priority list.
	#[must_use]
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			priority: PRIORITY_DIRECTORIES.iter().map(|name| name.to_string()).collect(),
		}
	}

	/// Replace the priority list.
	#[must_use]
	pub fn with_priority<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.priority = names.into_iter().map(Into::into).collect();
		self
	}

	/// Root being traversed.
	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Lazily enumerate the children of the root.
	///
	/// A root that does not exist yields nothing.
	#[must_use]
	pub fn entries(&self) -> LocalEntries {
		if !self.root.is_dir() {
			debug!(root = %self.root.display(), "search root is not a directory; nothing to traverse");
			return LocalEntries { walk: None };
		}

		LocalEntries {
			walk: Some(build_walk(&self.root, Arc::clone(&self.priority)).build()),
		}
	}
}

/// Iterator returned by [`LocalTraverser::entries`].
pub struct LocalEntries {
	walk: Option<Walk>,
}

impl Iterator for LocalEntries {
	type Item = LocalEntry;

	fn next(&mut self) -> Option<LocalEntry> {
		let walk = self.walk.as_mut()?;
		loop {
			match walk.next()? {
				Ok(entry) if entry.depth() == 0 => continue,
				Ok(entry) => {
					let is_dir = match entry.file_type() {
						Some(kind) if kind.is_symlink() => entry.path().is_dir(),
						Some(kind) => kind.is_dir(),
						None => false,
					};
					return Some(LocalEntry {
						path: entry.into_path(),
						is_dir,
					});
				}
				Err(err) => debug!(error = %err, "skipping unreadable entry"),
			}
		}
	}
}

/// Build a single-level walker. Links are not followed by the walk itself;
/// a link to a directory is still reported as a directory. with every standard filter disabled.
fn build_walk(root: &Path, priority: Arc<[String]>) -> WalkBuilder {
	let mut walker = WalkBuilder::new(root);

	walker
		.standard_filters(false)
		.follow_links(false)
		.max_depth(Some(1))
		.sort_by_file_name(move |left, right| compare_priority(&priority, left, right));

	walker
}

fn compare_priority(priority: &[String], left: &OsStr, right: &OsStr) -> Ordering {
	priority_rank(priority, left).cmp(&priority_rank(priority, right))
}

fn priority_rank(priority: &[String], name: &OsStr) -> usize {
	priority
		.iter()
		.position(|candidate| OsStr::new(candidate) == name)
		.unwrap_or(usize::MAX)
}
