//! Local filesystem access for the search: the priority-ordered walk of the
//! search root and the hidden-file policy applied to every candidate.

mod hidden;
mod traversal;

pub use hidden::{DotHiddenPolicy, HIDDEN_LIST_FILE, HiddenCache, HiddenPolicy};
pub use traversal::{LocalEntries, LocalEntry, LocalTraverser, PRIORITY_DIRECTORIES};
