//! Background query thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use hybrid_seek_stream::{CancelToken, ChannelSink, StreamEnvelope};

use super::{SearchOrchestrator, SearchReport};
use crate::query::QueryEntity;
use crate::results::ResultBatch;

/// Handle to a query running on its own thread.
///
/// Batches arrive on [`SearchHandle::results`]; the last one is marked
/// `complete`. Cancelling the token or dropping the handle stops the worker
/// at its next throttle check.
#[derive(Debug)]
pub struct SearchHandle {
	/// Streamed batches tagged with the query id.
	pub results: Receiver<StreamEnvelope<ResultBatch>>,
	token: CancelToken,
	worker: Option<JoinHandle<SearchReport>>,
}

impl SearchHandle {
	/// Ask the worker to stop.
	pub fn cancel(&self) {
		self.token.cancel();
	}

	/// Token shared with the worker.
	#[must_use]
	pub fn token(&self) -> &CancelToken {
		&self.token
	}

	/// Wait for the worker and return its report.
	///
	/// Returns `None` if the worker panicked.
	pub fn join(mut self) -> Option<SearchReport> {
		self.worker.take()?.join().ok()
	}
}

impl Drop for SearchHandle {
	fn drop(&mut self) {
		if self.worker.is_some() {
			self.token.cancel();
		}
	}
}

/// Run `query` on a dedicated thread.
pub fn spawn_search(
	orchestrator: Arc<SearchOrchestrator>,
	query: QueryEntity,
	id: u64,
) -> SearchHandle {
	let (tx, results) = mpsc::channel();
	let token = CancelToken::new();
	let sink = ChannelSink::new(tx, id, token.clone());

	let worker = thread::spawn(move || orchestrator.run(&query, sink));

	SearchHandle {
		results,
		token,
		worker: Some(worker),
	}
}
