use std::io::Write;

use anyhow::Result;
use hybrid_seek_core::{ResultBatch, SearchReport};
use hybrid_seek_stream::StreamEnvelope;
use serde_json::json;

use super::OutputFormat;

/// Writes streamed batches to an output in the chosen format.
pub(crate) struct BatchPrinter<W> {
	out: W,
	format: OutputFormat,
}

impl<W: Write> BatchPrinter<W> {
	pub(crate) fn new(out: W, format: OutputFormat) -> Self {
		Self { out, format }
	}

	/// Print one envelope. Empty intermediate batches are skipped in plain
	/// mode; JSON mode emits every batch so the terminal one is visible.
	pub(crate) fn print(&mut self, envelope: &StreamEnvelope<ResultBatch>) -> Result<()> {
		match self.format {
			OutputFormat::Plain => {
				for item in envelope.payload.items() {
					writeln!(self.out, "{}\t{}", item.weight, item.path)?;
				}
			}
			OutputFormat::Json => {
				writeln!(self.out, "{}", format_batch_json(envelope)?)?;
			}
		}
		self.out.flush()?;
		Ok(())
	}
}

/// Format a batch as a single-line JSON object.
pub(crate) fn format_batch_json(envelope: &StreamEnvelope<ResultBatch>) -> Result<String> {
	let payload = json!({
		"id": envelope.id,
		"complete": envelope.complete,
		"groups": envelope.payload,
	});
	Ok(serde_json::to_string(&payload)?)
}

/// Print the end-of-query summary on stderr.
pub(crate) fn print_report(report: &SearchReport) {
	eprintln!("{}", format_report(report));
}

fn format_report(report: &SearchReport) -> String {
	let mut line = format!(
		"{} matches in {} batches ({} ms, index {})",
		report.matches,
		report.pushes,
		report.elapsed.as_millis(),
		report.index_mode
	);
	if report.index_failures > 0 {
		line.push_str(&format!(
			", {} of {} index calls failed",
			report.index_failures, report.index_calls
		));
	}
	if report.cancelled {
		line.push_str(", cancelled");
	}
	line
}
