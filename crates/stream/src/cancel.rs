use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag shared between a producer and its consumer.
///
/// Cloning is cheap and every clone observes the same flag. Cancellation is
/// one-way: once set it never resets.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
	cancelled: Arc<AtomicBool>,
}

impl CancelToken {
	/// Create a token that has not been cancelled.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Request cancellation.
	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::Release);
	}

	/// Whether cancellation has been requested.
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::Acquire)
	}
}
