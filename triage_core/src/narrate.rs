/*!
# Default Triage: Run Narration

This is the ambient logging for both binaries. Unlike a long-running
service, a triage run is a short batch job, so narration is a handful of
serialized writes to stderr (and optionally a duplicate copy in a log file)
rather than anything backed by a structured logging framework.
*/

use fyi_msg::Msg;
use std::{
	fs::File,
	io::Write,
	path::Path,
};
use utc2k::FmtUtc2k;



/// # Run Narrator.
///
/// Buffers nothing; each call writes its line immediately so a run that is
/// killed partway through still leaves a readable trail.
pub struct Narrator {
	/// # Optional Log File.
	file: Option<File>,
}

impl Narrator {
	/// # New Instance, Writing Only to Stderr.
	pub const fn stderr_only() -> Self {
		Self { file: None }
	}

	/// # New Instance, Duplicating to a Log File.
	///
	/// ## Errors
	///
	/// Returns an error if `path` cannot be created/truncated.
	pub fn with_log_file(path: &Path) -> Result<Self, crate::TriageError> {
		let file = File::create(path).map_err(|_| crate::TriageError::Write(path.to_path_buf()))?;
		Ok(Self { file: Some(file) })
	}

	/// # Informational Line.
	pub fn info(&mut self, msg: &str) {
		Msg::info(msg).eprint();
		self.to_file("INFO", msg);
	}

	/// # Warning Line.
	pub fn warn(&mut self, msg: &str) {
		Msg::warning(msg).eprint();
		self.to_file("WARN", msg);
	}

	/// # Debug Line.
	///
	/// Only goes to the log file, if any; stderr stays quiet unless
	/// something actually needs attention.
	pub fn debug(&mut self, msg: &str) {
		self.to_file("DEBUG", msg);
	}

	/// # Write a Line to the Log File, If Any.
	fn to_file(&mut self, level: &str, msg: &str) {
		if let Some(f) = &mut self.file {
			let _res = writeln!(f, "[{}] {level}: {msg}", FmtUtc2k::now());
			let _res = f.flush();
		}
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_log_file_duplicates_lines() {
		let dir = tempfile::tempdir().expect("tempdir");
		let log_path = dir.path().join("run.log");
		let mut n = Narrator::with_log_file(&log_path).expect("create");
		n.info("hello");
		n.warn("uh oh");
		n.debug("quiet");
		drop(n);

		let contents = std::fs::read_to_string(&log_path).expect("read");
		assert!(contents.contains("INFO: hello"));
		assert!(contents.contains("WARN: uh oh"));
		assert!(contents.contains("DEBUG: quiet"));
	}
}
