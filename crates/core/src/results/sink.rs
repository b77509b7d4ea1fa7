use std::collections::HashMap;
use std::mem;

use super::{ItemCategory, MatchedItem, ResultBatch};

/// Default ceiling on unique matches per query.
pub const DEFAULT_RESULT_LIMIT: usize = 100;

/// Per-query accumulator shared by the local and index phases.
///
/// Owns the working batch, remembers every path accepted during the query so
/// a path is delivered at most once, and tracks running weights. Weights keep
/// growing after a push, but only the copy still sitting in the working batch
/// is updated; delivered items keep the weight they were pushed with.
#[derive(Debug)]
pub struct ResultSink {
	limit: usize,
	weights: HashMap<String, u32>,
	pending: HashMap<String, (&'static str, usize)>,
	batch: ResultBatch,
}

impl ResultSink {
	/// Create a sink that accepts at most `limit` unique paths.
	#[must_use]
	pub fn new(limit: usize) -> Self {
		Self {
			limit,
			weights: HashMap::new(),
			pending: HashMap::new(),
			batch: ResultBatch::new(),
		}
	}

	/// Add a path to the working batch.
	///
	/// Returns `false` without touching anything when the path was already
	/// accepted during this query or the cap is reached.
	pub fn append(&mut self, path: impl Into<String>, category: ItemCategory) -> bool {
		let path = path.into();
		if self.is_at_cap() || self.weights.contains_key(&path) {
			return false;
		}

		let index = self.batch.push(MatchedItem {
			path: path.clone(),
			category,
			weight: 0,
		});
		self.pending.insert(path.clone(), (category.group_key(), index));
		self.weights.insert(path, 0);
		true
	}

	/// Add `delta` to the running weight of a known path.
	pub fn accumulate_weight(&mut self, path: &str, delta: u32) {
		let Some(weight) = self.weights.get_mut(path) else {
			return;
		};
		*weight = weight.saturating_add(delta);
		let total = *weight;

		if let Some(&(key, index)) = self.pending.get(path)
			&& let Some(item) = self.batch.item_mut(key, index)
		{
			item.weight = total;
		}
	}

	/// Running weight of a path, if it was accepted.
	#[must_use]
	pub fn weight_of(&self, path: &str) -> Option<u32> {
		self.weights.get(path).copied()
	}

	/// Whether the unique-match ceiling is reached.
	#[must_use]
	pub fn is_at_cap(&self) -> bool {
		self.weights.len() >= self.limit
	}

	/// Unique paths accepted so far.
	#[must_use]
	pub fn accepted(&self) -> usize {
		self.weights.len()
	}

	/// Configured ceiling.
	#[must_use]
	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Whether the working batch holds undelivered matches.
	#[must_use]
	pub fn has_pending(&self) -> bool {
		!self.pending.is_empty()
	}

	/// Move the working batch out, leaving an empty one behind.
	pub fn take_batch(&mut self) -> ResultBatch {
		self.pending.clear();
		mem::take(&mut self.batch)
	}
}

impl Default for ResultSink {
	fn default() -> Self {
		Self::new(DEFAULT_RESULT_LIMIT)
	}
}
