/*!
# Default Triage: Run Options
*/

use std::path::{
	Path,
	PathBuf,
};



/// # Engine Options.
///
/// Every knob the triage engine needs, set via builder methods and
/// consumed once by [`crate::run`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
	/// # Failing-Trace Directory.
	crash_dir: PathBuf,
	/// # Passing-Trace Directory.
	non_crash_dir: PathBuf,
	/// # Output Directory.
	out_dir: PathBuf,
	/// # Optional Duplicate Log File.
	log_file: Option<PathBuf>,
}

impl EngineOptions {
	/// # New Instance.
	pub fn new<P: AsRef<Path>>(crash_dir: P, non_crash_dir: P, out_dir: P) -> Self {
		Self {
			crash_dir: crash_dir.as_ref().to_path_buf(),
			non_crash_dir: non_crash_dir.as_ref().to_path_buf(),
			out_dir: out_dir.as_ref().to_path_buf(),
			log_file: None,
		}
	}

	#[must_use]
	/// # Set a Duplicate Log File.
	pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.log_file = Some(path.as_ref().to_path_buf());
		self
	}

	/// # Failing-Trace Directory.
	pub fn crash_dir(&self) -> &Path { &self.crash_dir }

	/// # Passing-Trace Directory.
	pub fn non_crash_dir(&self) -> &Path { &self.non_crash_dir }

	/// # Output Directory.
	pub fn out_dir(&self) -> &Path { &self.out_dir }

	/// # Optional Duplicate Log File.
	pub fn log_file(&self) -> Option<&Path> { self.log_file.as_deref() }
}



/// # Standalone Scoring Options.
#[derive(Debug, Clone)]
pub struct ScoreOptions {
	/// # Directory of Existing Group Files.
	group_dir: PathBuf,
	/// # Output Path for the Summary Artefact.
	output_path: PathBuf,
}

impl ScoreOptions {
	/// # New Instance.
	pub fn new<P: AsRef<Path>>(group_dir: P, output_path: P) -> Self {
		Self {
			group_dir: group_dir.as_ref().to_path_buf(),
			output_path: output_path.as_ref().to_path_buf(),
		}
	}

	/// # Directory of Existing Group Files.
	pub fn group_dir(&self) -> &Path { &self.group_dir }

	/// # Output Path for the Summary Artefact.
	pub fn output_path(&self) -> &Path { &self.output_path }
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_engine_options_builder() {
		let opts = EngineOptions::new("crash", "pass", "out")
			.with_log_file("run.log");
		assert_eq!(opts.crash_dir(), Path::new("crash"));
		assert_eq!(opts.non_crash_dir(), Path::new("pass"));
		assert_eq!(opts.out_dir(), Path::new("out"));
		assert_eq!(opts.log_file(), Some(Path::new("run.log")));
	}

	#[test]
	fn t_engine_options_no_log_file_by_default() {
		let opts = EngineOptions::new("crash", "pass", "out");
		assert_eq!(opts.log_file(), None);
	}

	#[test]
	fn t_score_options() {
		let opts = ScoreOptions::new("groups", "groups/summary");
		assert_eq!(opts.group_dir(), Path::new("groups"));
		assert_eq!(opts.output_path(), Path::new("groups/summary"));
	}
}
