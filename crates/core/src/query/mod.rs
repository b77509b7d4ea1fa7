//! Structured description of what a search is looking for.
//!
//! A [`QueryEntity`] is built once per search and only borrowed afterwards.
//! It feeds the [`pattern`] builder, the time filter applied to every
//! candidate, and the keyword weighting.

mod category;
pub mod pattern;

use std::collections::BTreeSet;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use category::FileCategory;
pub use pattern::{KEYWORD_HIT_WEIGHT, NamePattern, build_pattern, keyword_weight};

/// Inclusive modification-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
	/// Earliest accepted modification time.
	pub from: DateTime<Utc>,
	/// Latest accepted modification time.
	pub to: DateTime<Utc>,
}

impl TimeRange {
	/// Create a window spanning `from..=to`.
	#[must_use]
	pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
		Self { from, to }
	}

	/// Whether `time` falls inside the window.
	#[must_use]
	pub fn contains(&self, time: DateTime<Utc>) -> bool {
		self.from <= time && time <= self.to
	}
}

/// Immutable description of a search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QueryFields")]
pub struct QueryEntity {
	keywords: Vec<String>,
	types: BTreeSet<FileCategory>,
	time_range: Option<TimeRange>,
}

impl QueryEntity {
	/// Create a query from name keywords.
	///
	/// Keywords are trimmed and blank entries dropped; order is preserved.
	#[must_use]
	pub fn new<I, S>(keywords: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			keywords: sanitize_keywords(keywords.into_iter().map(Into::into)),
			..Self::default()
		}
	}

	/// Restrict matches to the suffixes of the given categories.
	#[must_use]
	pub fn with_types(mut self, types: impl IntoIterator<Item = FileCategory>) -> Self {
		self.types.extend(types);
		self
	}

	/// Restrict matches to a modification-time window.
	#[must_use]
	pub fn with_time_range(mut self, range: TimeRange) -> Self {
		self.time_range = Some(range);
		self
	}

	/// Name keywords in insertion order.
	#[must_use]
	pub fn keywords(&self) -> &[String] {
		&self.keywords
	}

	/// Requested file categories.
	#[must_use]
	pub fn types(&self) -> &BTreeSet<FileCategory> {
		&self.types
	}

	/// Optional modification-time window.
	#[must_use]
	pub fn time_range(&self) -> Option<&TimeRange> {
		self.time_range.as_ref()
	}

	/// Suffixes derived from the requested categories, deduplicated in
	/// category order.
	#[must_use]
	pub fn suffixes(&self) -> Vec<&'static str> {
		let mut suffixes: Vec<&'static str> = Vec::new();
		for suffix in self.types.iter().flat_map(|category| category.suffixes()) {
			if !suffixes.contains(suffix) {
				suffixes.push(suffix);
			}
		}
		suffixes
	}

	/// Apply the time filter to a candidate's modification time.
	///
	/// Without a time window every candidate passes. With one, a candidate
	/// whose modification time is unknown is rejected.
	#[must_use]
	pub fn matches_modified(&self, modified: Option<SystemTime>) -> bool {
		let Some(range) = &self.time_range else {
			return true;
		};
		modified.is_some_and(|time| range.contains(DateTime::<Utc>::from(time)))
	}

	/// Keyword-hit score for a file name.
	#[must_use]
	pub fn weight_for(&self, name: &str) -> u32 {
		keyword_weight(&self.keywords, name)
	}
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct QueryFields {
	keywords: Vec<String>,
	types: BTreeSet<FileCategory>,
	time_range: Option<TimeRange>,
}

impl From<QueryFields> for QueryEntity {
	fn from(fields: QueryFields) -> Self {
		Self {
			keywords: sanitize_keywords(fields.keywords.into_iter()),
			types: fields.types,
			time_range: fields.time_range,
		}
	}
}

fn sanitize_keywords(values: impl Iterator<Item = String>) -> Vec<String> {
	values
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
		.collect()
}
