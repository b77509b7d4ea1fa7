use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by an index service call.
///
/// Every variant is scoped to the directory being queried: the orchestrator
/// drops that directory and moves on.
#[derive(Debug, Error)]
pub enum IndexError {
	/// The call did not complete within the adapter's timeout.
	#[error("index call for {} timed out", .directory.display())]
	Timeout { directory: PathBuf },

	/// The service rejected the request or failed while serving it.
	#[error("index service failed for {}: {message}", .directory.display())]
	Service { directory: PathBuf, message: String },

	/// The IPC transport itself is unavailable.
	#[error("index service is unreachable: {0}")]
	Unavailable(String),
}

/// A match expression that could not be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
	/// The expression is not a valid regular expression.
	#[error("invalid match expression '{pattern}': {source}")]
	Invalid {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

/// Failures while loading an index snapshot from disk.
#[derive(Debug, Error)]
pub enum SnapshotError {
	/// The snapshot file could not be read.
	#[error("failed to read index snapshot {}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The snapshot file is not valid snapshot JSON.
	#[error("failed to parse index snapshot {}", .path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}
