mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use hybrid_seek::logging;
use tracing::debug;

use cli::parse_cli;
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.verbose)?;

	let resolved = settings::load(&cli)?;
	if cli.print_config {
		resolved.print_summary();
	}

	let query = cli.query()?;
	debug!(?query, "parsed query");

	let workflow = SearchWorkflow::from_config(resolved)?;
	let report = workflow.run(query, cli.output)?;
	cli::print_report(&report);

	Ok(())
}
