use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use super::IndexService;

/// Process-wide handle to the index service.
///
/// Built once by the host and shared by reference between queries. Automatic
/// indexing of internal disks is switched on the first time the service is
/// used, and only once.
pub struct IndexConnection {
	service: Arc<dyn IndexService>,
	auto_index: OnceLock<bool>,
}

impl IndexConnection {
	/// Wrap a service implementation.
	pub fn new(service: impl IndexService + 'static) -> Self {
		Self::from_arc(Arc::new(service))
	}

	/// Wrap an already shared service implementation.
	#[must_use]
	pub fn from_arc(service: Arc<dyn IndexService>) -> Self {
		Self {
			service,
			auto_index: OnceLock::new(),
		}
	}

	/// Service handle, initializing automatic indexing on first use.
	pub fn service(&self) -> &dyn IndexService {
		self.ensure_auto_index();
		self.service.as_ref()
	}

	/// Convenience probe through [`IndexConnection::service`].
	pub fn has_index(&self, path: &Path) -> bool {
		self.service().has_index(path)
	}

	/// Enable automatic indexing if the service reports it off.
	///
	/// Runs at most once per connection; later calls return the first
	/// outcome.
	pub fn ensure_auto_index(&self) -> bool {
		*self
			.auto_index
			.get_or_init(|| enable_auto_index(self.service.as_ref()))
	}
}

impl fmt::Debug for IndexConnection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("IndexConnection")
			.field("auto_index", &self.auto_index.get())
			.finish_non_exhaustive()
	}
}

fn enable_auto_index(service: &dyn IndexService) -> bool {
	match service.auto_index_internal() {
		Ok(true) => true,
		Ok(false) => match service.set_auto_index_internal(true) {
			Ok(()) => {
				debug!("enabled automatic indexing of internal disks");
				true
			}
			Err(error) => {
				warn!(%error, "failed to enable automatic indexing");
				false
			}
		},
		Err(error) => {
			warn!(%error, "failed to query automatic indexing state");
			false
		}
	}
}
