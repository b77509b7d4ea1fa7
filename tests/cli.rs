use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn hseek(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_hseek"))
		.args(["--no-config"])
		.args(args)
		.env_remove("RUST_LOG")
		.env_remove("HSEEK_CONFIG")
		.output()
		.expect("hseek runs")
}

fn path_arg(path: &Path) -> &str {
	path.to_str().expect("utf-8 temp path")
}

#[test]
fn plain_output_lists_local_matches() {
	let home = tempdir().unwrap();
	fs::write(home.path().join("Report-2024.pdf"), b"x").unwrap();
	fs::write(home.path().join("notes.txt"), b"x").unwrap();

	let output = hseek(&["--root", path_arg(home.path()), "report"]);

	assert!(output.status.success());
	let stdout = String::from_utf8(output.stdout).unwrap();
	let lines: Vec<&str> = stdout.lines().collect();
	assert_eq!(lines.len(), 1);
	assert!(lines[0].starts_with("20\t"));
	assert!(lines[0].ends_with("Report-2024.pdf"));

	let stderr = String::from_utf8(output.stderr).unwrap();
	assert!(stderr.contains("1 matches"));
}

#[test]
fn json_output_merges_the_index_snapshot() {
	let home = tempdir().unwrap();
	let documents = home.path().join("Documents");
	fs::create_dir(&documents).unwrap();
	let snapshot = home.path().join("index.json");
	let indexed = documents.join("report-q3.txt");
	fs::write(
		&snapshot,
		serde_json::json!({
			"roots": [home.path()],
			"paths": [indexed],
		})
		.to_string(),
	)
	.unwrap();

	let output = hseek(&[
		"--root",
		path_arg(home.path()),
		"--index-snapshot",
		path_arg(&snapshot),
		"--output",
		"json",
		"report",
	]);

	assert!(output.status.success());
	let stdout = String::from_utf8(output.stdout).unwrap();
	let batches: Vec<Value> = stdout
		.lines()
		.map(|line| serde_json::from_str(line).unwrap())
		.collect();
	let last = batches.last().unwrap();
	assert_eq!(last["complete"], true);

	let found: Vec<&str> = batches
		.iter()
		.filter_map(|batch| batch["groups"]["file-inference"]["items"].as_array())
		.flatten()
		.filter_map(|item| item["path"].as_str())
		.collect();
	assert_eq!(found, [path_arg(&indexed)]);
}

#[test]
fn zero_limit_is_rejected() {
	let home = tempdir().unwrap();
	let output = hseek(&["--root", path_arg(home.path()), "--limit", "0"]);

	assert!(!output.status.success());
	let stderr = String::from_utf8(output.stderr).unwrap();
	assert!(stderr.contains("search.result_limit"));
}
