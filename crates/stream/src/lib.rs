//! Streaming primitives for handing result batches from a search worker to
//! its consumer.
//!
//! A producer pushes owned batches into a [`BatchSink`]. Every push answers
//! whether the producer may keep going, so cancellation travels back through
//! the same call that delivers data. Closures implement the trait directly,
//! which keeps the synchronous callback style cheap to use, while
//! [`ChannelSink`] moves the batches over an [`mpsc`] channel and pairs them
//! with a [`CancelToken`] so the consumer can live on another thread.
//!
//! [`Throttle`] tracks the push window: a producer delivers at most once per
//! interval, measured from its last push that carried data.
//!
//! Callback usage:
//! ```
//! use hybrid_seek_stream::BatchSink;
//!
//! let mut seen = Vec::new();
//! let mut sink = |batch: Vec<u32>| {
//!     seen.extend(batch);
//!     seen.len() < 3
//! };
//! assert!(sink.push(vec![1, 2]));
//! assert!(!sink.push(vec![3]));
//! ```
//!
//! Channel usage:
//! ```
//! use std::sync::mpsc;
//!
//! use hybrid_seek_stream::{BatchSink, CancelToken, ChannelSink};
//!
//! let (tx, rx) = mpsc::channel();
//! let token = CancelToken::new();
//! let mut sink = ChannelSink::new(tx, 7, token.clone());
//! assert!(sink.push(vec!["a"]));
//! token.cancel();
//! assert!(!sink.push(vec!["b"]));
//!
//! let envelope = rx.recv().unwrap();
//! assert_eq!(envelope.id, 7);
//! assert_eq!(envelope.payload, vec!["a"]);
//! ```
//! [`mpsc`]: std::sync::mpsc

mod cancel;
mod throttle;

use std::sync::mpsc::Sender;

pub use cancel::CancelToken;
pub use throttle::{DEFAULT_PUSH_INTERVAL, Throttle};

/// Message emitted by a background worker and delivered to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEnvelope<P> {
	/// Identifier correlating the message with a query.
	pub id: u64,
	/// Payload delivered to the consumer.
	pub payload: P,
	/// Whether the producer finished streaming for this identifier.
	pub complete: bool,
}

impl<P> StreamEnvelope<P> {
	/// Transform the payload while preserving the envelope metadata.
	pub fn map_payload<N>(self, f: impl FnOnce(P) -> N) -> StreamEnvelope<N> {
		StreamEnvelope {
			id: self.id,
			payload: f(self.payload),
			complete: self.complete,
		}
	}
}

/// Consumer of batches produced by a search.
///
/// Calls are strictly sequential and never reentrant. Ownership of every
/// batch moves into the sink. Returning `false` asks the producer to stop;
/// a well-behaved producer never calls the sink again afterwards.
pub trait BatchSink<B> {
	/// Deliver one batch and report whether production should continue.
	fn push(&mut self, batch: B) -> bool;

	/// Deliver the last batch of a query.
	///
	/// Defaults to [`BatchSink::push`]; sinks that distinguish partial from
	/// terminal updates override it.
	fn finish(&mut self, batch: B) -> bool {
		self.push(batch)
	}

	/// Whether the consumer already asked to stop without waiting for the
	/// next push.
	fn is_cancelled(&self) -> bool {
		false
	}
}

impl<B, F> BatchSink<B> for F
where
	F: FnMut(B) -> bool,
{
	fn push(&mut self, batch: B) -> bool {
		self(batch)
	}
}

/// Sink that forwards batches over an [`mpsc`](std::sync::mpsc) channel.
///
/// A push fails once the receiver hung up or the shared [`CancelToken`] was
/// cancelled, which the producer treats the same as a consumer returning
/// `false`.
#[derive(Debug)]
pub struct ChannelSink<B> {
	tx: Sender<StreamEnvelope<B>>,
	id: u64,
	token: CancelToken,
}

impl<B> ChannelSink<B> {
	/// Create a sink that tags every envelope with `id`.
	#[must_use]
	pub fn new(tx: Sender<StreamEnvelope<B>>, id: u64, token: CancelToken) -> Self {
		Self { tx, id, token }
	}

	/// Identifier attached to every envelope.
	#[must_use]
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Token shared with the consumer.
	#[must_use]
	pub fn token(&self) -> &CancelToken {
		&self.token
	}

	fn send(&self, payload: B, complete: bool) -> bool {
		if self.token.is_cancelled() {
			return false;
		}

		let sent = self
			.tx
			.send(StreamEnvelope {
				id: self.id,
				payload,
				complete,
			})
			.is_ok();
		sent && !self.token.is_cancelled()
	}
}

impl<B> BatchSink<B> for ChannelSink<B> {
	fn push(&mut self, batch: B) -> bool {
		self.send(batch, false)
	}

	fn finish(&mut self, batch: B) -> bool {
		self.send(batch, true)
	}

	fn is_cancelled(&self) -> bool {
		self.token.is_cancelled()
	}
}
