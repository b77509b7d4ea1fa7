use std::io;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use hybrid_seek_core::{
	IndexConnection, MemoryIndex, QueryEntity, SearchOrchestrator, SearchReport, spawn_search,
};
use tracing::debug;

use crate::cli::{BatchPrinter, OutputFormat};
use crate::settings::ResolvedConfig;

/// Coordinates building the orchestrator and streaming one query to stdout.
pub(crate) struct SearchWorkflow {
	orchestrator: Arc<SearchOrchestrator>,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let ResolvedConfig {
			search,
			index_snapshot,
		} = config;

		let mut orchestrator = SearchOrchestrator::new(search);
		if let Some(path) = index_snapshot {
			let index = MemoryIndex::load_snapshot(&path)
				.with_context(|| format!("failed to load index snapshot {}", path.display()))?;
			debug!(paths = index.len(), "serving index queries from snapshot");
			orchestrator = orchestrator.with_index(Arc::new(IndexConnection::new(index)));
		}

		Ok(Self {
			orchestrator: Arc::new(orchestrator),
		})
	}

	/// Run `query` on a worker thread and print batches as they arrive.
	///
	/// A closed stdout cancels the query.
	pub(crate) fn run(self, query: QueryEntity, format: OutputFormat) -> Result<SearchReport> {
		let handle = spawn_search(self.orchestrator, query, 0);
		let stdout = io::stdout();
		let mut printer = BatchPrinter::new(stdout.lock(), format);

		for envelope in handle.results.iter() {
			if let Err(err) = printer.print(&envelope) {
				handle.cancel();
				debug!(%err, "output closed; cancelling search");
				break;
			}
			if envelope.complete {
				break;
			}
		}
		drop(printer);

		handle
			.join()
			.ok_or_else(|| anyhow!("search worker panicked"))
	}
}
