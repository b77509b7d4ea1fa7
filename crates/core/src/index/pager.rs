use std::collections::VecDeque;
use std::path::PathBuf;

use tracing::{trace, warn};

use super::{INDEX_CALL_TIMEOUT, IndexService, PagedQuery, PaginationCursor, SearchRules};

/// Ceiling on calls issued for a single directory.
///
/// Guards against a service whose cursor never reports exhaustion.
pub const MAX_PAGES_PER_DIRECTORY: u32 = 10_000;

/// Walks a queue of directories through the index service one page at a time.
///
/// Every [`IndexPager::next_page`] issues at most one call, so the caller can
/// check for cancellation between calls. A failed call drops the directory
/// it was made for and never aborts the remaining queue.
#[derive(Debug)]
pub struct IndexPager {
	pending: VecDeque<PathBuf>,
	cursor: PaginationCursor,
	pages: u32,
	rules: SearchRules,
	calls: usize,
	failures: usize,
}

impl IndexPager {
	/// Create a pager over `directories`, visited in order.
	pub fn new(directories: impl IntoIterator<Item = PathBuf>, rules: SearchRules) -> Self {
		Self {
			pending: directories.into_iter().collect(),
			cursor: PaginationCursor::default(),
			pages: 0,
			rules,
			calls: 0,
			failures: 0,
		}
	}

	/// Whether every directory has been drained.
	#[must_use]
	pub fn is_done(&self) -> bool {
		self.pending.is_empty()
	}

	/// Service calls issued so far.
	#[must_use]
	pub fn calls(&self) -> usize {
		self.calls
	}

	/// Calls that returned an error.
	#[must_use]
	pub fn failures(&self) -> usize {
		self.failures
	}

	/// Fetch the next page for the current directory.
	///
	/// Returns `None` once the queue is empty. A failed call yields an empty
	/// page.
	pub fn next_page(&mut self, service: &dyn IndexService, pattern: &str) -> Option<Vec<String>> {
		let directory = self.pending.front()?.clone();
		let query = PagedQuery {
			directory: &directory,
			cursor: self.cursor,
			pattern,
			rules: self.rules,
			timeout: INDEX_CALL_TIMEOUT,
		};

		self.calls += 1;
		self.pages += 1;
		match service.paged_search(&query) {
			Ok(reply) => {
				trace!(
					directory = %directory.display(),
					start = reply.cursor.start,
					end = reply.cursor.end,
					hits = reply.paths.len(),
					"index page"
				);
				let stalled = reply.paths.is_empty() && reply.cursor == self.cursor;
				self.cursor = reply.cursor;
				if self.cursor.is_exhausted() || stalled {
					self.advance();
				} else if self.pages >= MAX_PAGES_PER_DIRECTORY {
					warn!(
						directory = %directory.display(),
						"index cursor never exhausted; skipping directory"
					);
					self.advance();
				}
				Some(reply.paths)
			}
			Err(error) => {
				self.failures += 1;
				warn!(%error, "index query failed; skipping directory");
				self.advance();
				Some(Vec::new())
			}
		}
	}

	fn advance(&mut self) {
		self.pending.pop_front();
		self.cursor.reset();
		self.pages = 0;
	}
}
