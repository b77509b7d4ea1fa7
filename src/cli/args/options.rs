use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::ValueEnum;
use hybrid_seek_core::FileCategory;

/// File categories selectable with `--type`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum CategoryArg {
	Document,
	Spreadsheet,
	Presentation,
	Picture,
	Video,
	Audio,
	Archive,
	Application,
	Folder,
}

impl CategoryArg {
	pub(crate) fn category(self) -> FileCategory {
		match self {
			CategoryArg::Document => FileCategory::Document,
			CategoryArg::Spreadsheet => FileCategory::Spreadsheet,
			CategoryArg::Presentation => FileCategory::Presentation,
			CategoryArg::Picture => FileCategory::Picture,
			CategoryArg::Video => FileCategory::Video,
			CategoryArg::Audio => FileCategory::Audio,
			CategoryArg::Archive => FileCategory::Archive,
			CategoryArg::Application => FileCategory::Application,
			CategoryArg::Folder => FileCategory::Folder,
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	/// `weight<TAB>path` per match.
	Plain,
	/// One JSON object per batch.
	Json,
}

/// Parse a lower time bound; a bare date means its first second.
pub(super) fn parse_since(value: &str) -> Result<DateTime<Utc>, String> {
	parse_bound(value, NaiveTime::MIN)
}

/// Parse an upper time bound; a bare date means its last second.
pub(super) fn parse_until(value: &str) -> Result<DateTime<Utc>, String> {
	let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
	parse_bound(value, end_of_day)
}

fn parse_bound(value: &str, time: NaiveTime) -> Result<DateTime<Utc>, String> {
	let value = value.trim();
	if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
		return Ok(stamp.with_timezone(&Utc));
	}
	NaiveDate::parse_from_str(value, "%Y-%m-%d")
		.map(|date| date.and_time(time).and_utc())
		.map_err(|_| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{value}'"))
}
