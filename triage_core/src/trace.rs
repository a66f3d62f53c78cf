/*!
# Default Triage: Traces
*/

use ahash::AHashMap;
use crate::TriageError;
use std::{
	collections::BTreeMap,
	fs::File,
	io::{
		BufRead,
		BufReader,
	},
	path::{
		Path,
		PathBuf,
	},
};



/// # A Single Trace.
///
/// Maps a basic-block address to the number of times it occurred in one
/// execution. Absent addresses implicitly count zero; nothing here ever
/// raises on a missing key.
pub type Trace = AHashMap<Box<str>, u64>;

/// # A Trace Set.
///
/// Traces keyed by a stable identifier — their originating file path — kept
/// in a `BTreeMap` so iteration order is the sorted path order, matching the
/// loader's own directory walk and keeping later stages deterministic.
pub type TraceSet = BTreeMap<PathBuf, Trace>;



/// # Load Traces From a Directory Tree.
///
/// Every regular file found recursively under `root` is parsed as one
/// trace. Files that yield no addresses — empty files, files consisting
/// entirely of malformed lines — are silently omitted from the result.
///
/// ## Errors
///
/// This will return an error if `root` cannot be read as a directory.
pub fn load_traces(root: &Path) -> Result<TraceSet, TriageError> {
	let mut paths = Vec::new();
	collect_files(root, &mut paths)?;
	paths.sort_unstable();

	let mut out = TraceSet::new();
	for path in paths {
		if let Some(trace) = load_trace(&path)? {
			out.insert(path, trace);
		}
	}

	Ok(out)
}

/// # Load a Single Trace File.
///
/// Parses each non-blank line as `<address> <count>`; lines without exactly
/// two whitespace-separated tokens are skipped. Repeated addresses within
/// the file are summed. Returns `None` if the file yields no addresses.
///
/// ## Errors
///
/// This will return an error if the file cannot be opened.
fn load_trace(path: &Path) -> Result<Option<Trace>, TriageError> {
	let file = File::open(path).map_err(|_| TriageError::Directory(path.to_path_buf()))?;
	let mut trace = Trace::default();

	for line in BufReader::new(file).lines().map_while(Result::ok) {
		let line = line.trim();
		if line.is_empty() { continue; }

		let mut parts = line.split_whitespace();
		let (Some(addr), Some(count), None) = (parts.next(), parts.next(), parts.next())
		else { continue };

		let Ok(count) = count.parse::<u64>() else { continue };

		trace.entry(Box::from(addr))
			.and_modify(|v| *v += count)
			.or_insert(count);
	}

	if trace.is_empty() { Ok(None) }
	else { Ok(Some(trace)) }
}

/// # Recursively Collect Regular Files.
///
/// ## Errors
///
/// This will return an error if `dir` cannot be read.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), TriageError> {
	let entries = std::fs::read_dir(dir)
		.map_err(|_| TriageError::Directory(dir.to_path_buf()))?;

	for entry in entries.flatten() {
		let path = entry.path();
		let Ok(file_type) = entry.file_type() else { continue };

		if file_type.is_dir() { collect_files(&path, out)?; }
		else if file_type.is_file() { out.push(path); }
	}

	Ok(())
}



#[cfg(test)]
mod test {
	use super::*;
	use std::io::Write;

	#[test]
	fn t_load_trace_sums_and_skips() {
		let dir = tempfile::tempdir().expect("tempdir");
		let file_path = dir.path().join("one");
		let mut f = File::create(&file_path).expect("create");
		writeln!(f, "0xAAAA 3").unwrap();
		writeln!(f, "0xBBBB 1").unwrap();
		writeln!(f, "0xAAAA 2").unwrap();
		writeln!(f, "garbage line with too many tokens").unwrap();
		writeln!(f).unwrap();
		drop(f);

		let trace = load_trace(&file_path).expect("read").expect("non-empty");
		assert_eq!(trace.get("0xAAAA").copied(), Some(5));
		assert_eq!(trace.get("0xBBBB").copied(), Some(1));
		assert_eq!(trace.len(), 2);
	}

	#[test]
	fn t_load_trace_empty_is_dropped() {
		let dir = tempfile::tempdir().expect("tempdir");
		let file_path = dir.path().join("empty");
		File::create(&file_path).expect("create");

		assert!(load_trace(&file_path).expect("read").is_none());
	}

	#[test]
	fn t_load_traces_recursive_sorted() {
		let dir = tempfile::tempdir().expect("tempdir");
		let sub = dir.path().join("bug1");
		std::fs::create_dir(&sub).unwrap();
		for name in ["b", "a"] {
			let mut f = File::create(sub.join(name)).unwrap();
			writeln!(f, "0x1 1").unwrap();
		}

		let set = load_traces(dir.path()).expect("load");
		assert_eq!(set.len(), 2);
		let keys: Vec<_> = set.keys().collect();
		assert!(keys[0] < keys[1]);
	}
}
