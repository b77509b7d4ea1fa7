use std::fmt::Write;

use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	eprint!("{}", render_summary(config));
}

fn render_summary(config: &ResolvedConfig) -> String {
	let search = &config.search;
	let mut out = String::from("Effective configuration:\n");
	let _ = writeln!(out, "  Root: {}", search.home.display());
	let _ = writeln!(out, "  Result limit: {}", search.result_limit);
	let _ = writeln!(out, "  Push interval: {} ms", search.push_interval.as_millis());
	let _ = writeln!(out, "  Mount marker: {}", search.mount_marker.display());
	let _ = writeln!(out, "  Include hidden: {}", bool_to_word(search.include_hidden));
	if search.priority_dirs.is_empty() {
		let _ = writeln!(out, "  Priority directories: (none)");
	} else {
		let _ = writeln!(out, "  Priority directories: {}", search.priority_dirs.join(", "));
	}
	match &config.index_snapshot {
		Some(path) => {
			let _ = writeln!(out, "  Index snapshot: {}", path.display());
		}
		None => {
			let _ = writeln!(out, "  Index snapshot: (none, local search only)");
		}
	}
	out
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
