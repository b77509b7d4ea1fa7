use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use hybrid_seek_core::index::{PagedQuery, PagedReply, SearchRules};
use hybrid_seek_core::{
	FileCategory, IndexConnection, IndexError, IndexMode, IndexService, ItemCategory, MatchedItem,
	MemoryIndex, QueryEntity, ResultBatch, SearchOptions, SearchOrchestrator, SearchReport,
	TimeRange,
};
use tempfile::{TempDir, tempdir};

/// Delegates to a [`MemoryIndex`] and records every paged call.
struct Recorder {
	inner: MemoryIndex,
	failing: HashSet<PathBuf>,
	calls: Mutex<Vec<PathBuf>>,
}

impl Recorder {
	fn new(roots: &[&Path], paths: &[PathBuf]) -> Arc<Self> {
		Arc::new(Self {
			inner: MemoryIndex::new(
				roots.iter().map(|root| root.to_path_buf()),
				paths.iter().map(|path| path.to_string_lossy().into_owned()),
			),
			failing: HashSet::new(),
			calls: Mutex::new(Vec::new()),
		})
	}

	fn failing(mut self: Arc<Self>, directory: PathBuf) -> Arc<Self> {
		Arc::get_mut(&mut self).unwrap().failing.insert(directory);
		self
	}

	fn calls(&self) -> Vec<PathBuf> {
		self.calls.lock().unwrap().clone()
	}
}

impl IndexService for Recorder {
	fn has_index(&self, path: &Path) -> bool {
		self.inner.has_index(path)
	}

	fn auto_index_internal(&self) -> Result<bool, IndexError> {
		self.inner.auto_index_internal()
	}

	fn set_auto_index_internal(&self, enabled: bool) -> Result<(), IndexError> {
		self.inner.set_auto_index_internal(enabled)
	}

	fn paged_search(&self, query: &PagedQuery<'_>) -> Result<PagedReply, IndexError> {
		self.calls.lock().unwrap().push(query.directory.to_path_buf());
		if self.failing.contains(query.directory) {
			return Err(IndexError::Service {
				directory: query.directory.to_path_buf(),
				message: "connection reset".into(),
			});
		}
		self.inner.paged_search(query)
	}
}

fn home_with(files: &[&str], dirs: &[&str]) -> TempDir {
	let home = tempdir().unwrap();
	for dir in dirs {
		fs::create_dir_all(home.path().join(dir)).unwrap();
	}
	for file in files {
		let path = home.path().join(file);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).unwrap();
		}
		fs::write(path, b"x").unwrap();
	}
	home
}

/// Options that keep every match in the terminal batch.
fn quiet_options(home: &Path) -> SearchOptions {
	SearchOptions {
		push_interval: Duration::from_secs(60),
		..SearchOptions::for_home(home)
	}
}

fn collect(
	orchestrator: &SearchOrchestrator,
	query: &QueryEntity,
) -> (Vec<ResultBatch>, SearchReport) {
	let mut batches = Vec::new();
	let report = orchestrator.run(query, |batch: ResultBatch| {
		batches.push(batch);
		true
	});
	(batches, report)
}

fn items(batches: &[ResultBatch]) -> Vec<MatchedItem> {
	batches
		.iter()
		.flat_map(|batch| batch.items().cloned())
		.collect()
}

fn paths(batches: &[ResultBatch]) -> Vec<String> {
	items(batches).into_iter().map(|item| item.path).collect()
}

fn display(path: PathBuf) -> String {
	path.to_string_lossy().into_owned()
}

#[test]
fn keywords_match_names_case_insensitively() {
	let home = home_with(&["Report_Final.pdf", "my-draft.txt", "summary.txt"], &[]);
	let orchestrator = SearchOrchestrator::new(quiet_options(home.path()));

	let (batches, report) = collect(&orchestrator, &QueryEntity::new(["report", "draft"]));

	let found: HashSet<String> = paths(&batches).into_iter().collect();
	assert_eq!(
		found,
		HashSet::from([
			display(home.path().join("Report_Final.pdf")),
			display(home.path().join("my-draft.txt")),
		])
	);
	assert_eq!(report.index_mode, IndexMode::Disabled);
	assert_eq!(report.pushes, 1);
}

#[test]
fn repeated_keywords_score_once() {
	let home = home_with(&["ReportReport.pdf"], &[]);
	let orchestrator = SearchOrchestrator::new(quiet_options(home.path()));

	let (batches, _) = collect(&orchestrator, &QueryEntity::new(["report"]));

	let items = items(&batches);
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].weight, 20);
}

#[test]
fn folders_and_files_are_grouped_separately() {
	let home = home_with(&["report.txt"], &["reports"]);
	let orchestrator = SearchOrchestrator::new(quiet_options(home.path()));

	let (batches, _) = collect(&orchestrator, &QueryEntity::new(["report"]));

	let batch = batches.last().unwrap();
	assert_eq!(batch.group("file-inference").unwrap().items.len(), 1);
	assert_eq!(batch.group("folder-inference").unwrap().items.len(), 1);
}

#[test]
fn type_filter_restricts_suffixes() {
	let home = home_with(&["song.mp3", "notes.txt", "cover.png"], &[]);
	let orchestrator = SearchOrchestrator::new(quiet_options(home.path()));
	let query = QueryEntity::new(Vec::<String>::new()).with_types([FileCategory::Audio]);

	let (batches, _) = collect(&orchestrator, &query);

	assert_eq!(paths(&batches), [display(home.path().join("song.mp3"))]);
}

#[test]
fn hidden_entries_are_filtered_unless_requested() {
	let home = home_with(&[".report-secret.txt", "report-listed.txt", "report.txt"], &[]);
	fs::write(home.path().join(".hidden"), "report-listed.txt\n").unwrap();

	let orchestrator = SearchOrchestrator::new(quiet_options(home.path()));
	let (batches, _) = collect(&orchestrator, &QueryEntity::new(["report"]));
	assert_eq!(paths(&batches), [display(home.path().join("report.txt"))]);

	let orchestrator = SearchOrchestrator::new(SearchOptions {
		include_hidden: true,
		..quiet_options(home.path())
	});
	let (batches, _) = collect(&orchestrator, &QueryEntity::new(["report"]));
	assert_eq!(paths(&batches).len(), 3);
}

#[test]
fn time_window_filters_by_modification() {
	let home = home_with(&["report.txt"], &[]);
	let orchestrator = SearchOrchestrator::new(quiet_options(home.path()));

	let now: DateTime<Utc> = SystemTime::now().into();
	let recent = TimeRange::new(now - chrono::Duration::hours(1), now + chrono::Duration::hours(1));
	let (batches, _) = collect(
		&orchestrator,
		&QueryEntity::new(["report"]).with_time_range(recent),
	);
	assert_eq!(paths(&batches).len(), 1);

	let ancient = TimeRange::new(
		now - chrono::Duration::days(3650),
		now - chrono::Duration::days(3649),
	);
	let (batches, report) = collect(
		&orchestrator,
		&QueryEntity::new(["report"]).with_time_range(ancient),
	);
	assert!(paths(&batches).is_empty());
	assert_eq!(report.matches, 0);
}

#[test]
fn missing_root_yields_one_empty_batch() {
	let home = tempdir().unwrap();
	let orchestrator = SearchOrchestrator::new(quiet_options(&home.path().join("gone")));

	let (batches, report) = collect(&orchestrator, &QueryEntity::new(["report"]));

	assert_eq!(batches.len(), 1);
	assert!(batches[0].is_empty());
	assert!(!report.cancelled);
}

#[test]
fn result_cap_holds_across_batches() {
	let files: Vec<String> = (0..30).map(|n| format!("report-{n:02}.txt")).collect();
	let names: Vec<&str> = files.iter().map(String::as_str).collect();
	let home = home_with(&names, &[]);
	let orchestrator = SearchOrchestrator::new(SearchOptions {
		result_limit: 5,
		push_interval: Duration::ZERO,
		..SearchOptions::for_home(home.path())
	});

	let (batches, report) = collect(&orchestrator, &QueryEntity::new(["report"]));

	assert_eq!(paths(&batches).len(), 5);
	assert_eq!(report.matches, 5);
}

#[test]
fn throttle_bounds_callbacks_by_elapsed_time() {
	let files: Vec<String> = (0..1000).map(|n| format!("file-{n:04}.txt")).collect();
	let names: Vec<&str> = files.iter().map(String::as_str).collect();
	let home = home_with(&names, &[]);
	let orchestrator = SearchOrchestrator::new(SearchOptions {
		result_limit: 5000,
		..SearchOptions::for_home(home.path())
	});

	let (batches, report) = collect(&orchestrator, &QueryEntity::default());

	assert_eq!(paths(&batches).len(), 1000);
	let windows = usize::try_from(report.elapsed.as_millis() / 100).unwrap();
	assert!(
		batches.len() <= windows + 2,
		"{} pushes in {:?}",
		batches.len(),
		report.elapsed
	);
	assert_eq!(batches.len(), report.pushes);
}

#[test]
fn local_and_index_hits_are_deduplicated() {
	let home = home_with(&["Documents/report-a.txt"], &[]);
	let documents = home.path().join("Documents");
	let indexed = documents.join("report-a.txt");
	let recorder = Recorder::new(
		&[home.path()],
		&[indexed.clone(), indexed.clone(), documents.join("report-b.txt")],
	);
	let orchestrator = SearchOrchestrator::new(quiet_options(home.path()))
		.with_index(Arc::new(IndexConnection::from_arc(recorder.clone())));

	let (batches, report) = collect(&orchestrator, &QueryEntity::new(["report"]));

	let items = items(&batches);
	assert_eq!(items.len(), 2);
	let first = items.iter().find(|item| item.path == display(indexed.clone())).unwrap();
	assert_eq!(first.weight, 40);
	assert_eq!(report.index_mode, IndexMode::Direct);
	assert_eq!(recorder.calls(), [documents]);
}

#[test]
fn pagination_stops_when_the_cursor_closes() {
	let home = home_with(&[], &["Documents", "Music"]);
	let documents = home.path().join("Documents");
	let indexed: Vec<PathBuf> = (0..5).map(|n| documents.join(format!("{n}.txt"))).collect();
	let recorder = Recorder::new(&[home.path()], &indexed);
	let orchestrator = SearchOrchestrator::new(SearchOptions {
		rules: SearchRules {
			max_results: 2,
			..SearchRules::default()
		},
		..quiet_options(home.path())
	})
	.with_index(Arc::new(IndexConnection::from_arc(recorder.clone())));

	let (batches, report) = collect(&orchestrator, &QueryEntity::default());

	// Documents and Music themselves plus the five indexed files.
	assert_eq!(paths(&batches).len(), 7);
	let calls = recorder.calls();
	assert_eq!(calls.iter().filter(|dir| **dir == documents).count(), 3);
	assert_eq!(calls.len(), 4);
	assert_eq!(report.index_calls, 4);
}

#[test]
fn failing_directory_does_not_abort_the_sweep() {
	let home = home_with(&[], &["Documents", "Music"]);
	let documents = home.path().join("Documents");
	let music = home.path().join("Music");
	let recorder = Recorder::new(
		&[home.path()],
		&[documents.join("report-1.txt"), music.join("report-2.mp3")],
	)
	.failing(music.clone());
	let orchestrator = SearchOrchestrator::new(quiet_options(home.path()))
		.with_index(Arc::new(IndexConnection::from_arc(recorder.clone())));

	let (batches, report) = collect(&orchestrator, &QueryEntity::new(["report"]));

	assert_eq!(paths(&batches), [display(documents.join("report-1.txt"))]);
	assert_eq!(report.index_failures, 1);
	assert!(!report.cancelled);
}

#[test]
fn unindexed_home_degrades_to_local_search() {
	let home = home_with(&["report.txt"], &["Documents"]);
	let recorder = Recorder::new(&[Path::new("/elsewhere")], &[]);
	let orchestrator = SearchOrchestrator::new(SearchOptions {
		mount_marker: home.path().join("no-such-marker"),
		..quiet_options(home.path())
	})
	.with_index(Arc::new(IndexConnection::from_arc(recorder.clone())));

	let (batches, report) = collect(&orchestrator, &QueryEntity::new(["report"]));

	assert_eq!(paths(&batches), [display(home.path().join("report.txt"))]);
	assert_eq!(report.index_mode, IndexMode::Unavailable);
	assert!(recorder.calls().is_empty());
}

#[test]
fn mount_marker_fallback_strips_the_prefix() {
	let marker = tempdir().unwrap();
	let home = PathBuf::from("/home/hseek-test-user");
	let rewritten = marker.path().join("home/hseek-test-user");
	fs::create_dir_all(rewritten.join("Documents")).unwrap();
	fs::write(rewritten.join("report.txt"), b"x").unwrap();

	let recorder = Recorder::new(
		&[rewritten.as_path()],
		&[rewritten.join("Documents/report-q3.txt")],
	);
	let orchestrator = SearchOrchestrator::new(SearchOptions {
		mount_marker: marker.path().to_path_buf(),
		..quiet_options(&home)
	})
	.with_index(Arc::new(IndexConnection::from_arc(recorder.clone())));

	let (batches, report) = collect(&orchestrator, &QueryEntity::new(["report"]));

	let found: HashSet<String> = paths(&batches).into_iter().collect();
	assert_eq!(
		found,
		HashSet::from([
			"/home/hseek-test-user/report.txt".to_string(),
			"/home/hseek-test-user/Documents/report-q3.txt".to_string(),
		])
	);
	assert_eq!(report.index_mode, IndexMode::Rewritten);
	assert_eq!(recorder.calls(), [rewritten.join("Documents")]);
}

#[test]
fn refusal_during_local_phase_stops_everything() {
	let files: Vec<String> = (0..50).map(|n| format!("report-{n:02}.txt")).collect();
	let names: Vec<&str> = files.iter().map(String::as_str).collect();
	let home = home_with(&names, &["Documents"]);
	let recorder = Recorder::new(&[home.path()], &[home.path().join("Documents/report.txt")]);
	let orchestrator = SearchOrchestrator::new(SearchOptions {
		push_interval: Duration::ZERO,
		..SearchOptions::for_home(home.path())
	})
	.with_index(Arc::new(IndexConnection::from_arc(recorder.clone())));

	let mut calls = 0;
	let report = orchestrator.run(&QueryEntity::new(["report"]), |_: ResultBatch| {
		calls += 1;
		false
	});

	assert_eq!(calls, 1);
	assert!(report.cancelled);
	assert!(recorder.calls().is_empty());
}

#[test]
fn refusal_during_index_phase_stops_paging() {
	let home = home_with(&[], &["Documents"]);
	let documents = home.path().join("Documents");
	let indexed: Vec<PathBuf> = (0..10)
		.map(|n| documents.join(format!("report-{n}.txt")))
		.collect();
	let recorder = Recorder::new(&[home.path()], &indexed);
	let orchestrator = SearchOrchestrator::new(SearchOptions {
		push_interval: Duration::ZERO,
		rules: SearchRules {
			max_results: 1,
			..SearchRules::default()
		},
		..SearchOptions::for_home(home.path())
	})
	.with_index(Arc::new(IndexConnection::from_arc(recorder.clone())));

	let mut calls = 0;
	let report = orchestrator.run(&QueryEntity::new(["report"]), |_: ResultBatch| {
		calls += 1;
		false
	});

	assert_eq!(calls, 1);
	assert!(report.cancelled);
	assert_eq!(recorder.calls().len(), 1);
}

#[test]
fn result_cap_stops_index_paging() {
	let home = home_with(&[], &["Documents"]);
	let documents = home.path().join("Documents");
	let indexed: Vec<PathBuf> = (0..50)
		.map(|n| documents.join(format!("report-{n:02}.txt")))
		.collect();
	let recorder = Recorder::new(&[home.path()], &indexed);
	let orchestrator = SearchOrchestrator::new(SearchOptions {
		result_limit: 7,
		rules: SearchRules {
			max_results: 10,
			..SearchRules::default()
		},
		..quiet_options(home.path())
	})
	.with_index(Arc::new(IndexConnection::from_arc(recorder.clone())));

	let (batches, report) = collect(&orchestrator, &QueryEntity::new(["report"]));

	assert_eq!(paths(&batches).len(), 7);
	assert_eq!(report.matches, 7);
	assert_eq!(recorder.calls(), [documents]);
	assert_eq!(report.index_calls, 1);
	assert!(!report.cancelled);
}

#[cfg(unix)]
#[test]
fn linked_home_folders_are_searched_through_the_index() {
	let home = tempdir().unwrap();
	let elsewhere = tempdir().unwrap();
	let documents = home.path().join("Documents");
	std::os::unix::fs::symlink(elsewhere.path(), &documents).unwrap();
	let indexed = documents.join("doc-notes.txt");
	let recorder = Recorder::new(&[home.path()], std::slice::from_ref(&indexed));
	let orchestrator = SearchOrchestrator::new(quiet_options(home.path()))
		.with_index(Arc::new(IndexConnection::from_arc(recorder.clone())));

	let (batches, _) = collect(&orchestrator, &QueryEntity::new(["doc"]));

	let folders: Vec<String> = items(&batches)
		.into_iter()
		.filter(|item| item.category == ItemCategory::Folder)
		.map(|item| item.path)
		.collect();
	assert_eq!(folders, [display(documents.clone())]);
	assert!(paths(&batches).contains(&display(indexed)));
	assert_eq!(recorder.calls(), [documents]);
}
