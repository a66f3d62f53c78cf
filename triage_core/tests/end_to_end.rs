/*!
# Default Triage: End-to-End Tests

Drives the public `run`/`score_existing` entry points against on-disk trace
fixtures, the way the binaries would.
*/

use std::fs::{
	self,
	File,
};
use std::io::Write;
use triage_core::EngineOptions;

/// # Write One Trace File.
fn write_trace(path: &std::path::Path, lines: &[(&str, u64)]) {
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	let mut f = File::create(path).unwrap();
	for &(addr, count) in lines {
		writeln!(f, "{addr} {count}").unwrap();
	}
}

#[test]
fn t_run_empty_corpora_yields_no_groups() {
	let dir = tempfile::tempdir().unwrap();
	let crash_dir = dir.path().join("crash");
	let non_crash_dir = dir.path().join("pass");
	let out_dir = dir.path().join("out");
	fs::create_dir_all(&crash_dir).unwrap();
	fs::create_dir_all(&non_crash_dir).unwrap();

	let opts = EngineOptions::new(&crash_dir, &non_crash_dir, &out_dir);
	let groups = triage_core::run(&opts).expect("run");
	assert!(groups.is_empty());

	let summary = fs::read_to_string(out_dir.join("summary")).expect("summary");
	assert!(summary.contains("\"num_clusters\":0"));
}

#[test]
fn t_run_two_bugs_writes_groups_and_summary() {
	let dir = tempfile::tempdir().unwrap();
	let crash_dir = dir.path().join("crash");
	let non_crash_dir = dir.path().join("pass");
	let out_dir = dir.path().join("out");

	write_trace(&crash_dir.join("bug1/f1"), &[("X", 5)]);
	write_trace(&crash_dir.join("bug1/f2"), &[("X", 5)]);
	write_trace(&crash_dir.join("bug2/f3"), &[("Y", 4)]);
	write_trace(&crash_dir.join("bug2/f4"), &[("Y", 4)]);
	write_trace(&non_crash_dir.join("ok/p1"), &[]);

	let opts = EngineOptions::new(&crash_dir, &non_crash_dir, &out_dir);
	let groups = triage_core::run(&opts).expect("run");
	assert_eq!(groups.len(), 2);

	assert!(out_dir.join("0").exists());
	assert!(out_dir.join("1").exists());

	let summary = fs::read_to_string(out_dir.join("summary")).expect("summary");
	assert!(summary.contains("\"purity\""));

	// Re-score the engine's own output with the standalone scorer and check
	// it agrees the partition is perfectly pure.
	let rescored_path = dir.path().join("rescored-summary");
	let opts = triage_core::ScoreOptions::new(out_dir.clone(), rescored_path.clone());
	let report = triage_core::score_existing(&opts).expect("score_existing");
	assert_eq!(report.num_clusters, 2);
	assert_eq!(report.num_completely_lost, 0);
	assert!(rescored_path.exists());
}

#[test]
fn t_run_malformed_lines_are_skipped_not_fatal() {
	let dir = tempfile::tempdir().unwrap();
	let crash_dir = dir.path().join("crash");
	let non_crash_dir = dir.path().join("pass");
	let out_dir = dir.path().join("out");

	fs::create_dir_all(crash_dir.join("bug1")).unwrap();
	let mut f = File::create(crash_dir.join("bug1/f1")).unwrap();
	writeln!(f, "this line has way too many tokens to parse").unwrap();
	writeln!(f, "A 3").unwrap();
	drop(f);
	fs::create_dir_all(&non_crash_dir).unwrap();

	let opts = EngineOptions::new(&crash_dir, &non_crash_dir, &out_dir);
	let groups = triage_core::run(&opts).expect("run");
	// One failing trace, zero passing traces: the loop never starts, so the
	// whole trace is simply never grouped.
	assert!(groups.is_empty());
}
