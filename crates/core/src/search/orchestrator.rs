use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use hybrid_seek_stream::BatchSink;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{IndexMode, SearchOptions, SearchRoot, StreamPump};
use crate::filesystem::{DotHiddenPolicy, HiddenCache, HiddenPolicy, LocalTraverser};
use crate::index::{IndexConnection, IndexPager, IndexService};
use crate::query::QueryEntity;
use crate::query::pattern::{NamePattern, build_pattern};
use crate::results::{ItemCategory, ResultBatch, ResultSink};

/// Summary of one finished query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
	/// Calls made into the consumer, including the terminal one.
	pub pushes: usize,
	/// Unique matches accepted.
	pub matches: usize,
	/// Whether the consumer stopped the query.
	pub cancelled: bool,
	/// How the external index took part.
	pub index_mode: IndexMode,
	/// Index calls issued.
	pub index_calls: usize,
	/// Index calls that failed.
	pub index_failures: usize,
	/// Wall time spent in the query.
	#[serde(with = "millis")]
	pub elapsed: Duration,
}

/// Runs hybrid queries: a local walk of the home directory followed by a
/// paginated sweep of the external index over the directories found.
///
/// One orchestrator can serve many queries, sequentially or from several
/// threads; everything query-specific lives inside [`SearchOrchestrator::run`].
pub struct SearchOrchestrator {
	options: SearchOptions,
	index: Option<Arc<IndexConnection>>,
	hidden: Arc<dyn HiddenPolicy>,
}

impl SearchOrchestrator {
	/// Local-only orchestrator using the dot-file hidden policy.
	#[must_use]
	pub fn new(options: SearchOptions) -> Self {
		Self {
			options,
			index: None,
			hidden: Arc::new(DotHiddenPolicy),
		}
	}

	/// Attach the shared index connection.
	#[must_use]
	pub fn with_index(mut self, index: Arc<IndexConnection>) -> Self {
		self.index = Some(index);
		self
	}

	/// Replace the hidden-file policy.
	#[must_use]
	pub fn with_hidden_policy(mut self, policy: Arc<dyn HiddenPolicy>) -> Self {
		self.hidden = policy;
		self
	}

	/// Active options.
	#[must_use]
	pub fn options(&self) -> &SearchOptions {
		&self.options
	}

	/// Run one query to completion, streaming batches into `sink`.
	///
	/// Never fails: an unreachable index, a missing root, or a refused push
	/// all end the query early and are reflected in the report.
	pub fn run<S: BatchSink<ResultBatch>>(&self, query: &QueryEntity, sink: S) -> SearchReport {
		let options = &self.options;
		let root = SearchRoot::resolve(&options.home, &options.mount_marker, self.index.as_deref());
		let mut run = QueryRun {
			query,
			root: &root,
			hidden: (!options.include_hidden).then_some(self.hidden.as_ref()),
			cache: HiddenCache::new(),
			results: ResultSink::new(options.result_limit),
			pump: StreamPump::new(sink, options.push_interval),
			accepted: 0,
			limit: options.result_limit,
			index_calls: 0,
			index_failures: 0,
		};

		let source = build_pattern(query);
		match NamePattern::compile(source) {
			Ok(pattern) => {
				debug!(pattern = pattern.as_str(), root = %root.root().display(), "local phase");
				let traverser =
					LocalTraverser::new(root.root()).with_priority(options.priority_dirs.clone());
				let directories = run.local_phase(&traverser, &pattern);

				if let Some(index) = &self.index
					&& root.uses_index()
					&& !run.pump.is_cancelled()
					&& !run.is_full()
				{
					debug!(directories = directories.len(), "index phase");
					let mut pager = IndexPager::new(directories, options.effective_rules());
					run.index_phase(index.service(), &mut pager, pattern.as_str());
					run.index_calls = pager.calls();
					run.index_failures = pager.failures();
				}
			}
			Err(error) => warn!(%error, "query produced an unusable match expression"),
		}

		run.pump.finish(&mut run.results);

		let report = SearchReport {
			pushes: run.pump.pushes(),
			matches: run.results.accepted(),
			cancelled: run.pump.is_cancelled(),
			index_mode: root.mode(),
			index_calls: run.index_calls,
			index_failures: run.index_failures,
			elapsed: run.pump.elapsed(),
		};
		info!(
			matches = report.matches,
			pushes = report.pushes,
			cancelled = report.cancelled,
			index = %report.index_mode,
			elapsed_ms = report.elapsed.as_millis(),
			"search finished"
		);
		report
	}
}

/// State owned by a single query.
struct QueryRun<'a, S> {
	query: &'a QueryEntity,
	root: &'a SearchRoot,
	hidden: Option<&'a dyn HiddenPolicy>,
	cache: HiddenCache,
	results: ResultSink,
	pump: StreamPump<S>,
	// Counts every accepted reference, repeats included.
	accepted: usize,
	limit: usize,
	index_calls: usize,
	index_failures: usize,
}

impl<S: BatchSink<ResultBatch>> QueryRun<'_, S> {
	fn is_full(&self) -> bool {
		self.accepted >= self.limit || self.results.is_at_cap()
	}

	/// Walk the root's children and return every directory among them.
	fn local_phase(&mut self, traverser: &LocalTraverser, pattern: &NamePattern) -> Vec<PathBuf> {
		let mut directories = Vec::new();
		for entry in traverser.entries() {
			if !self.pump.poll(&mut self.results) || self.is_full() {
				break;
			}
			if entry.is_dir {
				directories.push(entry.path.clone());
			}
			if !pattern.is_match(&entry.file_name()) {
				continue;
			}

			let category = if entry.is_dir {
				ItemCategory::Folder
			} else {
				ItemCategory::File
			};
			let modified = if self.query.time_range().is_some() {
				fs::metadata(&entry.path).ok().as_ref().and_then(modified_time)
			} else {
				None
			};
			self.consider(&entry.path, category, modified);
		}
		directories
	}

	fn index_phase(&mut self, service: &dyn IndexService, pager: &mut IndexPager, pattern: &str) {
		while !self.is_full() {
			if !self.pump.poll(&mut self.results) {
				return;
			}
			let Some(paths) = pager.next_page(service, pattern) else {
				return;
			};
			for raw in paths {
				if !self.pump.poll(&mut self.results) || self.is_full() {
					return;
				}
				let path = PathBuf::from(raw);
				let metadata = fs::metadata(&path).ok();
				let category = if metadata.as_ref().is_some_and(Metadata::is_dir) {
					ItemCategory::Folder
				} else {
					ItemCategory::File
				};
				self.consider(&path, category, metadata.as_ref().and_then(modified_time));
			}
		}
	}

	/// Time filter, hidden filter, prefix normalization, then accept.
	fn consider(&mut self, path: &Path, category: ItemCategory, modified: Option<SystemTime>) {
		if !self.query.matches_modified(modified) {
			return;
		}
		if let Some(policy) = self.hidden
			&& policy.is_hidden(path, self.root.root(), &mut self.cache)
		{
			return;
		}

		let reported = self.root.report_path(path);
		self.accepted += 1;
		self.results.append(reported.as_str(), category);

		let name = path
			.file_name()
			.map(|name| name.to_string_lossy())
			.unwrap_or_default();
		self.results
			.accumulate_weight(&reported, self.query.weight_for(&name));
	}
}

fn modified_time(metadata: &Metadata) -> Option<SystemTime> {
	metadata.modified().ok()
}

mod millis {
	use std::time::Duration;

	use serde::Serializer;

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
	}
}
