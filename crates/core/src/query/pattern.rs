//! Match expression construction and keyword weighting.

use regex::{Regex, RegexBuilder};

use super::QueryEntity;
use crate::error::PatternError;

/// Score added for every keyword found in a file name.
pub const KEYWORD_HIT_WEIGHT: u32 = 20;

/// Build the match expression shared by the local walk and the index service.
///
/// Keywords become a prefix-tolerant alternation `(k1|k2).*` (or `.*` when
/// there are none) and the suffixes of the requested categories are appended
/// as `\.(s1|s2)`. Keywords are escaped so they always match literally.
#[must_use]
pub fn build_pattern(query: &QueryEntity) -> String {
	let mut pattern = if query.keywords().is_empty() {
		String::from(".*")
	} else {
		let escaped: Vec<String> = query
			.keywords()
			.iter()
			.map(|keyword| regex::escape(keyword))
			.collect();
		format!("({}).*", escaped.join("|"))
	};

	let suffixes = query.suffixes();
	if !suffixes.is_empty() {
		pattern.push_str(&format!(r"\.({})", suffixes.join("|")));
	}

	pattern
}

/// Score a file name by how many keywords it contains, ignoring case.
///
/// Each keyword counts once no matter how often it occurs in the name.
#[must_use]
pub fn keyword_weight(keywords: &[String], name: &str) -> u32 {
	let name = name.to_lowercase();
	let hits = keywords
		.iter()
		.filter(|keyword| name.contains(&keyword.to_lowercase()))
		.count();
	u32::try_from(hits)
		.unwrap_or(u32::MAX)
		.saturating_mul(KEYWORD_HIT_WEIGHT)
}

/// Case-insensitive compiled form of a match expression.
#[derive(Debug, Clone)]
pub struct NamePattern {
	source: String,
	regex: Regex,
}

impl NamePattern {
	/// Compile an arbitrary expression.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] when the expression is not a valid regex.
	pub fn compile(source: impl Into<String>) -> Result<Self, PatternError> {
		let source = source.into();
		let regex = RegexBuilder::new(&source)
			.case_insensitive(true)
			.build()
			.map_err(|err| PatternError::Invalid {
				pattern: source.clone(),
				source: err,
			})?;
		Ok(Self { source, regex })
	}

	/// Build and compile the expression for a query.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if the generated expression fails to compile.
	pub fn for_query(query: &QueryEntity) -> Result<Self, PatternError> {
		Self::compile(build_pattern(query))
	}

	/// Whether the expression occurs anywhere in `name`.
	#[must_use]
	pub fn is_match(&self, name: &str) -> bool {
		self.regex.is_match(name)
	}

	/// Expression text as sent to the index service.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.source
	}
}
