use std::time::Duration;

use hybrid_seek_stream::{BatchSink, Throttle};

use crate::results::{ResultBatch, ResultSink};

/// Throttled bridge between a query's [`ResultSink`] and its consumer.
///
/// Mid-query pushes happen only when the throttle window elapsed and there
/// is something to deliver. Once the consumer answers `false` the pump
/// never calls it again.
#[derive(Debug)]
pub struct StreamPump<S> {
	sink: S,
	throttle: Throttle,
	pushes: usize,
	cancelled: bool,
}

impl<S: BatchSink<ResultBatch>> StreamPump<S> {
	/// Wrap a consumer with a fresh throttle window.
	pub fn new(sink: S, interval: Duration) -> Self {
		Self {
			sink,
			throttle: Throttle::new(interval),
			pushes: 0,
			cancelled: false,
		}
	}

	/// Push the working batch if due and report whether to keep going.
	pub fn poll(&mut self, results: &mut ResultSink) -> bool {
		if self.cancelled {
			return false;
		}
		if self.sink.is_cancelled() {
			self.cancelled = true;
			return false;
		}
		if results.has_pending() && self.throttle.is_due() {
			let keep_going = self.sink.push(results.take_batch());
			self.pushes += 1;
			self.throttle.mark_pushed();
			self.cancelled = !keep_going;
		}
		!self.cancelled
	}

	/// Deliver the terminal batch, possibly empty, unless the consumer
	/// already cancelled.
	pub fn finish(&mut self, results: &mut ResultSink) {
		if self.cancelled || self.sink.is_cancelled() {
			self.cancelled = true;
			return;
		}
		let batch = results.take_batch();
		self.pushes += 1;
		self.cancelled = !self.sink.finish(batch);
	}

	/// Whether the consumer asked to stop.
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.cancelled
	}

	/// Calls made into the consumer.
	#[must_use]
	pub fn pushes(&self) -> usize {
		self.pushes
	}

	/// Time since the pump was created.
	#[must_use]
	pub fn elapsed(&self) -> Duration {
		self.throttle.elapsed()
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;
	use crate::results::ItemCategory;

	#[test]
	fn nothing_is_pushed_before_the_window_elapses() {
		let mut calls = 0;
		let mut results = ResultSink::new(10);
		results.append("/home/u/a.txt", ItemCategory::File);
		{
			let mut pump = StreamPump::new(
				|_: ResultBatch| {
					calls += 1;
					true
				},
				Duration::from_secs(60),
			);
			assert!(pump.poll(&mut results));
			assert_eq!(pump.pushes(), 0);
		}
		assert_eq!(calls, 0);
		assert!(results.has_pending());
	}

	#[test]
	fn due_batch_is_moved_into_the_consumer() {
		let mut received = Vec::new();
		let mut results = ResultSink::new(10);
		results.append("/home/u/a.txt", ItemCategory::File);
		{
			let mut pump = StreamPump::new(
				|batch: ResultBatch| {
					received.push(batch);
					true
				},
				Duration::ZERO,
			);
			thread::sleep(Duration::from_millis(2));
			assert!(pump.poll(&mut results));
			assert!(pump.poll(&mut results));
			assert_eq!(pump.pushes(), 1);
		}
		assert_eq!(received.len(), 1);
		assert_eq!(received[0].len(), 1);
		assert!(!results.has_pending());
	}

	#[test]
	fn a_push_restarts_the_window() {
		let mut results = ResultSink::new(10);
		results.append("/home/u/a.txt", ItemCategory::File);
		let mut pump = StreamPump::new(|_: ResultBatch| true, Duration::from_millis(200));

		thread::sleep(Duration::from_millis(210));
		assert!(pump.poll(&mut results));
		assert_eq!(pump.pushes(), 1);

		results.append("/home/u/b.txt", ItemCategory::File);
		assert!(pump.poll(&mut results));
		assert_eq!(pump.pushes(), 1);
		assert!(results.has_pending());
	}

	#[test]
	fn refusal_stops_all_further_calls() {
		let mut calls = 0;
		let mut results = ResultSink::new(10);
		results.append("/home/u/a.txt", ItemCategory::File);
		{
			let mut pump = StreamPump::new(
				|_: ResultBatch| {
					calls += 1;
					false
				},
				Duration::ZERO,
			);
			thread::sleep(Duration::from_millis(2));
			assert!(!pump.poll(&mut results));
			results.append("/home/u/b.txt", ItemCategory::File);
			assert!(!pump.poll(&mut results));
			pump.finish(&mut results);
			assert!(pump.is_cancelled());
		}
		assert_eq!(calls, 1);
	}

	#[test]
	fn finish_delivers_an_empty_terminal_batch() {
		let mut received = Vec::new();
		let mut results = ResultSink::new(10);
		{
			let mut pump = StreamPump::new(
				|batch: ResultBatch| {
					received.push(batch);
					true
				},
				Duration::from_secs(60),
			);
			pump.finish(&mut results);
			assert_eq!(pump.pushes(), 1);
		}
		assert_eq!(received.len(), 1);
		assert!(received[0].is_empty());
	}
}
