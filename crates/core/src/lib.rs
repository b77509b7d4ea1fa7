//! Hybrid streaming file search.
//!
//! A query walks the direct children of the home directory on disk, then
//! sweeps the external filename index over the directories it found. Both
//! sources feed one [`ResultSink`] that deduplicates, weighs and caps the
//! matches, and a [`StreamPump`] hands batches to the consumer at most once
//! per throttle window. The consumer stops the query by refusing a batch.
//!
//! ```no_run
//! use hybrid_seek_core::{QueryEntity, ResultBatch, SearchOptions, SearchOrchestrator};
//!
//! let orchestrator = SearchOrchestrator::new(SearchOptions::default());
//! let query = QueryEntity::new(["report"]);
//! let report = orchestrator.run(&query, |batch: ResultBatch| {
//!     for item in batch.items() {
//!         println!("{}\t{}", item.weight, item.path);
//!     }
//!     true
//! });
//! println!("{} matches", report.matches);
//! ```

pub mod error;
pub mod filesystem;
pub mod index;
pub mod query;
pub mod results;
pub mod search;

pub use hybrid_seek_stream::{BatchSink, CancelToken, ChannelSink, StreamEnvelope};

pub use crate::error::{IndexError, PatternError, SnapshotError};
pub use crate::index::{IndexConnection, IndexService, MemoryIndex};
pub use crate::query::{FileCategory, QueryEntity, TimeRange};
pub use crate::results::{ItemCategory, MatchedItem, ResultBatch, ResultGroup, ResultSink};
pub use crate::search::{
	IndexMode, SearchHandle, SearchOptions, SearchOrchestrator, SearchReport, StreamPump,
	spawn_search,
};
