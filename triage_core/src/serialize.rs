/*!
# Default Triage: Result Serialization

Groups go out one file per cluster, named by ordinal; a sibling `summary`
file carries over/undercount notices, the metrics record as a single-line
JSON object, and one line per lost bug label — in that order, matching the
reference tool's write sequence exactly.
*/

use crate::{
	ScoreReport,
	TriageError,
	dedup::Group,
};
use std::path::Path;



/// # Write One File Per Group.
///
/// Each file is named by its ordinal (`0`, `1`, …) and lists the group's
/// trace identifiers, one per line, in emission order.
///
/// ## Errors
///
/// Returns an error if `out_dir` cannot be created or a group file cannot
/// be written.
pub(crate) fn write_groups(out_dir: &Path, groups: &[Group]) -> Result<(), TriageError> {
	std::fs::create_dir_all(out_dir).map_err(|_| TriageError::OutDir(out_dir.to_path_buf()))?;

	for (i, group) in groups.iter().enumerate() {
		let path = out_dir.join(i.to_string());
		let mut body = String::new();
		for id in group {
			body.push_str(&id.display().to_string());
			body.push('\n');
		}
		write_atomic::write_file(&path, body.as_bytes())
			.map_err(|_| TriageError::Write(path.clone()))?;
	}

	Ok(())
}

/// # Write the Summary File.
///
/// Line order is: overcounting notices, undercounting notices, the metrics
/// record as one JSON line, then one line per lost bug label.
///
/// ## Errors
///
/// Returns an error if the summary file cannot be written.
pub(crate) fn write_summary(summary_path: &Path, report: &ScoreReport) -> Result<(), TriageError> {
	let mut body = String::new();

	for line in &report.overcount_notices {
		body.push_str(line);
		body.push('\n');
	}
	for line in &report.undercount_notices {
		body.push_str(line);
		body.push('\n');
	}

	let json = serde_json::to_string(report)
		.map_err(|_| TriageError::Bug("ScoreReport failed to serialize"))?;
	body.push_str(&json);
	body.push('\n');

	for bug in &report.lost {
		body.push_str(&format!("Bug {bug} has no distinct cluster and will be lost\n"));
	}

	write_atomic::write_file(summary_path, body.as_bytes())
		.map_err(|_| TriageError::Write(summary_path.to_path_buf()))
}

/// # Read Back a Directory of Group Files.
///
/// Used by the standalone scorer, which re-reads the engine's own output
/// layout. The `summary` entry, if present, is skipped; files that yield no
/// trace identifiers are skipped too.
///
/// ## Errors
///
/// Returns an error if `group_dir` cannot be read.
pub(crate) fn read_groups(group_dir: &Path) -> Result<Vec<Group>, TriageError> {
	let mut entries: Vec<_> = std::fs::read_dir(group_dir)
		.map_err(|_| TriageError::Directory(group_dir.to_path_buf()))?
		.flatten()
		.map(|e| e.path())
		.collect();
	entries.sort_unstable();

	let mut groups = Vec::new();
	for path in entries {
		if path.file_name().is_some_and(|n| n == "summary") { continue; }
		let Ok(text) = std::fs::read_to_string(&path) else { continue };
		let group: Group = text.lines()
			.map(str::trim)
			.filter(|l| !l.is_empty())
			.map(std::path::PathBuf::from)
			.collect();
		if !group.is_empty() { groups.push(group); }
	}

	Ok(groups)
}
