use std::path::PathBuf;

use anyhow::{Result, ensure};
use chrono::{DateTime, Utc};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};
use hybrid_seek_core::{QueryEntity, TimeRange};

use super::options::{CategoryArg, OutputFormat, parse_since, parse_until};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `hseek` binary.
#[derive(Parser, Debug)]
#[command(
	name = "hseek",
	version,
	long_version = long_version(),
	about = "Stream file name matches from the home directory and the system file index",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		value_name = "KEYWORD",
		help = "Match names containing any keyword, ignoring case (default: match everything)"
	)]
	pub(crate) keywords: Vec<String>,
	#[arg(
		short = 't',
		long = "type",
		value_enum,
		value_delimiter = ',',
		action = ArgAction::Append,
		value_name = "CATEGORY",
		help = "Restrict matches to a file category (default: any)"
	)]
	pub(crate) types: Vec<CategoryArg>,
	#[arg(
		long,
		value_name = "DATE",
		value_parser = parse_since,
		help = "Only match entries modified at or after DATE (YYYY-MM-DD or RFC 3339)"
	)]
	pub(crate) since: Option<DateTime<Utc>>,
	#[arg(
		long,
		value_name = "DATE",
		value_parser = parse_until,
		help = "Only match entries modified at or before DATE (YYYY-MM-DD or RFC 3339)"
	)]
	pub(crate) until: Option<DateTime<Utc>>,
	#[arg(
		short = 'c',
		long = "config",
		value_name = "FILE",
		env = "HSEEK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'r',
		long,
		value_name = "PATH",
		help = "Override the directory to search (default: home directory)"
	)]
	pub(crate) root: Option<PathBuf>,
	#[arg(
		short = 'l',
		long,
		value_name = "NUM",
		help = "Stop after this many matches (default: 100)"
	)]
	pub(crate) limit: Option<usize>,
	#[arg(
		long = "push-interval",
		value_name = "MS",
		help = "Minimum milliseconds between two result batches (default: 100)"
	)]
	pub(crate) push_interval_ms: Option<u64>,
	#[arg(
		long = "mount-marker",
		value_name = "PATH",
		help = "Prefix tried when the home directory is indexed elsewhere (default: /data)"
	)]
	pub(crate) mount_marker: Option<PathBuf>,
	#[arg(
		short = 'H',
		long = "hidden",
		value_parser = BoolishValueParser::new(),
		help = "Include hidden files (default: disabled)"
	)]
	pub(crate) hidden: Option<bool>,
	#[arg(
		short = 'i',
		long = "index-snapshot",
		value_name = "FILE",
		help = "Serve index queries from a JSON snapshot (default: local search only)"
	)]
	pub(crate) index_snapshot: Option<PathBuf>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'v',
		long,
		help = "Log debug diagnostics to stderr (default: disabled)"
	)]
	pub(crate) verbose: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print results"
	)]
	pub(crate) output: OutputFormat,
}

impl CliArgs {
	/// Assemble the query described by the positional keywords and filters.
	pub(crate) fn query(&self) -> Result<QueryEntity> {
		let mut query = QueryEntity::new(self.keywords.iter().cloned())
			.with_types(self.types.iter().map(|arg| arg.category()));

		if self.since.is_some() || self.until.is_some() {
			let from = self.since.unwrap_or(DateTime::<Utc>::MIN_UTC);
			let to = self.until.unwrap_or(DateTime::<Utc>::MAX_UTC);
			ensure!(from <= to, "--since must not be later than --until");
			query = query.with_time_range(TimeRange::new(from, to));
		}

		Ok(query)
	}
}
