//! Contract with the external filename index and the paginated client that
//! drives it.
//!
//! The service is reached through [`IndexService`]; the real IPC adapter
//! lives outside this crate. [`IndexConnection`] is the long-lived handle a
//! host constructs once and shares between queries, [`IndexPager`] walks the
//! pending directories of a single query page by page, and [`MemoryIndex`]
//! is an in-process implementation for tests and offline use.

mod connection;
mod memory;
mod pager;

use std::path::Path;
use std::time::Duration;

pub use connection::IndexConnection;
pub use memory::MemoryIndex;
pub use pager::{IndexPager, MAX_PAGES_PER_DIRECTORY};

use crate::error::IndexError;

/// Budget attached to every paged call; adapters fail the call with
/// [`IndexError::Timeout`] once it runs out.
pub const INDEX_CALL_TIMEOUT: Duration = Duration::from_secs(1);

/// Largest page requested from the service.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Position inside one directory's indexed entries.
///
/// `start >= end` after a call means the directory is exhausted. A fresh
/// cursor is `(0, 0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationCursor {
	/// Offset of the next entry to return.
	pub start: u32,
	/// Offset one past the last known entry.
	pub end: u32,
}

impl PaginationCursor {
	/// Create a cursor from raw offsets.
	#[must_use]
	pub fn new(start: u32, end: u32) -> Self {
		Self { start, end }
	}

	/// Whether no entries remain.
	#[must_use]
	pub fn is_exhausted(&self) -> bool {
		self.start >= self.end
	}

	/// Rewind to the beginning.
	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

/// Options sent with every paged query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRules {
	/// Largest number of paths per reply.
	pub max_results: u32,
	/// Skip entries hidden by system rules.
	pub exclude_hidden: bool,
	/// Interpret the pattern as a regular expression.
	pub use_regex: bool,
	/// Match without regard to case.
	pub case_insensitive: bool,
}

impl Default for SearchRules {
	fn default() -> Self {
		Self {
			max_results: DEFAULT_PAGE_SIZE,
			exclude_hidden: true,
			use_regex: true,
			case_insensitive: true,
		}
	}
}

impl SearchRules {
	const MAX_COUNT: &'static str = "0x02";
	const REGEX: &'static str = "0x01";
	const IGNORE_CASE: &'static str = "0x03";
	const HIDDEN_FILTER: &'static str = "0x40";

	/// Render the rules in the index daemon's textual rule format.
	///
	/// Each rule is a hex tag followed by its value, e.g. `0x02100` for a
	/// page size of 100.
	#[must_use]
	pub fn encode(&self) -> Vec<String> {
		let mut rules = vec![format!("{}{}", Self::MAX_COUNT, self.max_results)];
		if self.exclude_hidden {
			rules.push(format!("{}.", Self::HIDDEN_FILTER));
		}
		rules.push(format!("{}{}", Self::REGEX, u8::from(self.use_regex)));
		rules.push(format!("{}{}", Self::IGNORE_CASE, u8::from(self.case_insensitive)));
		rules
	}
}

/// One paged request against a directory.
#[derive(Debug, Clone, Copy)]
pub struct PagedQuery<'a> {
	/// Directory whose indexed descendants are searched.
	pub directory: &'a Path,
	/// Cursor returned by the previous call, or a fresh one.
	pub cursor: PaginationCursor,
	/// Match expression applied to file names.
	pub pattern: &'a str,
	/// Matching options.
	pub rules: SearchRules,
	/// Longest the adapter may block on this call.
	pub timeout: Duration,
}

/// Successful reply to a [`PagedQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagedReply {
	/// Absolute paths matching the pattern.
	pub paths: Vec<String>,
	/// Cursor to pass to the next call.
	pub cursor: PaginationCursor,
}

/// External filename index reachable over IPC.
///
/// Implementations must tolerate concurrent calls from independent queries,
/// or serialize them internally.
pub trait IndexService: Send + Sync {
	/// Whether the service maintains an index covering `path`.
	fn has_index(&self, path: &Path) -> bool;

	/// Whether automatic indexing of internal disks is enabled.
	///
	/// # Errors
	///
	/// Returns [`IndexError`] when the service cannot be queried.
	fn auto_index_internal(&self) -> Result<bool, IndexError>;

	/// Toggle automatic indexing of internal disks.
	///
	/// # Errors
	///
	/// Returns [`IndexError`] when the service rejects the change.
	fn set_auto_index_internal(&self, enabled: bool) -> Result<(), IndexError>;

	/// Fetch the next page of matches below a directory.
	///
	/// An exhausted directory is a successful reply whose cursor satisfies
	/// [`PaginationCursor::is_exhausted`]; `Err` is reserved for failed calls.
	///
	/// # Errors
	///
	/// Returns [`IndexError`] when the call fails or times out.
	fn paged_search(&self, query: &PagedQuery<'_>) -> Result<PagedReply, IndexError>;
}
