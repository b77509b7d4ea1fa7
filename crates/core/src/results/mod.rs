//! Matches accepted by a search and the batches they are delivered in.

mod sink;

use indexmap::IndexMap;
use serde::Serialize;

pub use sink::{DEFAULT_RESULT_LIMIT, ResultSink};

/// Group holding matched files.
pub const GROUP_FILE_INFERENCE: &str = "file-inference";
/// Group holding matched directories.
pub const GROUP_FOLDER_INFERENCE: &str = "folder-inference";

/// Kind of filesystem entry a match refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemCategory {
	/// Regular file, or anything that is not a directory.
	File,
	/// Directory.
	Folder,
}

impl ItemCategory {
	/// Group a match of this category is filed under.
	#[must_use]
	pub fn group_key(self) -> &'static str {
		match self {
			ItemCategory::File => GROUP_FILE_INFERENCE,
			ItemCategory::Folder => GROUP_FOLDER_INFERENCE,
		}
	}
}

/// One accepted search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedItem {
	/// Absolute path as reported to the consumer.
	pub path: String,
	/// Entry kind.
	pub category: ItemCategory,
	/// Keyword-hit score.
	pub weight: u32,
}

/// Matches sharing a group, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultGroup {
	/// Logical bucket name.
	pub key: String,
	/// Matches in the order they were found.
	pub items: Vec<MatchedItem>,
}

impl ResultGroup {
	/// Create an empty group.
	#[must_use]
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			items: Vec::new(),
		}
	}
}

/// Unit of delivery: every group touched since the previous push.
///
/// Groups keep the order in which they first received a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultBatch {
	groups: IndexMap<String, ResultGroup>,
}

impl ResultBatch {
	/// Create an empty batch.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether the batch carries no matches.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.groups.values().all(|group| group.items.is_empty())
	}

	/// Total number of matches across all groups.
	#[must_use]
	pub fn len(&self) -> usize {
		self.groups.values().map(|group| group.items.len()).sum()
	}

	/// Look up a group by key.
	#[must_use]
	pub fn group(&self, key: &str) -> Option<&ResultGroup> {
		self.groups.get(key)
	}

	/// Groups in first-touched order.
	pub fn groups(&self) -> impl Iterator<Item = &ResultGroup> {
		self.groups.values()
	}

	/// Every match, group by group.
	pub fn items(&self) -> impl Iterator<Item = &MatchedItem> {
		self.groups.values().flat_map(|group| group.items.iter())
	}

	/// Consume the batch into its groups.
	pub fn into_groups(self) -> impl Iterator<Item = ResultGroup> {
		self.groups.into_values()
	}

	/// Append a match and return its position inside its group.
	pub(crate) fn push(&mut self, item: MatchedItem) -> usize {
		let key = item.category.group_key();
		let group = self
			.groups
			.entry(key.to_string())
			.or_insert_with(|| ResultGroup::new(key));
		group.items.push(item);
		group.items.len() - 1
	}

	pub(crate) fn item_mut(&mut self, key: &str, index: usize) -> Option<&mut MatchedItem> {
		self.groups.get_mut(key)?.items.get_mut(index)
	}
}
