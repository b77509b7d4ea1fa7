use std::time::{Duration, Instant};

/// Minimum wall-clock gap between two non-empty pushes.
pub const DEFAULT_PUSH_INTERVAL: Duration = Duration::from_millis(100);

/// Time-based push gate.
///
/// The window is measured from the start of the query and from the last push
/// that actually carried data. Empty pushes leave the window untouched so a
/// quiet stretch cannot keep postponing the next delivery.
#[derive(Debug, Clone)]
pub struct Throttle {
	started: Instant,
	last_push: Duration,
	interval: Duration,
}

impl Throttle {
	/// Start a throttle window now.
	#[must_use]
	pub fn new(interval: Duration) -> Self {
		Self::starting_at(Instant::now(), interval)
	}

	/// Start a throttle window at an explicit instant.
	#[must_use]
	pub fn starting_at(started: Instant, interval: Duration) -> Self {
		Self {
			started,
			last_push: Duration::ZERO,
			interval,
		}
	}

	/// Time elapsed since the window started.
	#[must_use]
	pub fn elapsed(&self) -> Duration {
		self.started.elapsed()
	}

	/// Whether more than one interval passed since the last non-empty push.
	#[must_use]
	pub fn is_due(&self) -> bool {
		self.is_due_at(Instant::now())
	}

	/// [`Throttle::is_due`] evaluated at `now`.
	#[must_use]
	pub fn is_due_at(&self, now: Instant) -> bool {
		now.saturating_duration_since(self.started)
			.saturating_sub(self.last_push)
			> self.interval
	}

	/// Record a push that delivered data.
	pub fn mark_pushed(&mut self) {
		self.mark_pushed_at(Instant::now());
	}

	/// [`Throttle::mark_pushed`] evaluated at `now`.
	pub fn mark_pushed_at(&mut self, now: Instant) {
		self.last_push = now.saturating_duration_since(self.started);
	}

	/// Configured interval.
	#[must_use]
	pub fn interval(&self) -> Duration {
		self.interval
	}
}

impl Default for Throttle {
	fn default() -> Self {
		Self::new(DEFAULT_PUSH_INTERVAL)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn due_only_after_the_interval_strictly_elapses() {
		let start = Instant::now();
		let throttle = Throttle::starting_at(start, Duration::from_millis(100));

		assert!(!throttle.is_due_at(start + Duration::from_millis(50)));
		assert!(!throttle.is_due_at(start + Duration::from_millis(100)));
		assert!(throttle.is_due_at(start + Duration::from_millis(101)));
	}

	#[test]
	fn marking_a_push_restarts_the_window() {
		let start = Instant::now();
		let mut throttle = Throttle::starting_at(start, Duration::from_millis(100));

		throttle.mark_pushed_at(start + Duration::from_millis(150));

		assert!(!throttle.is_due_at(start + Duration::from_millis(200)));
		assert!(throttle.is_due_at(start + Duration::from_millis(251)));
	}

	#[test]
	fn unmarked_window_stays_due() {
		let start = Instant::now();
		let throttle = Throttle::starting_at(start, Duration::from_millis(100));
		let later = start + Duration::from_millis(300);

		assert!(throttle.is_due_at(later));
		assert!(throttle.is_due_at(later + Duration::from_millis(1)));
	}
}
