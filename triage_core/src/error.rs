/*!
# Default Triage: Errors
*/

use fyi_msg::Msg;
use std::{
	error::Error,
	fmt,
	path::PathBuf,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Errors.
pub enum TriageError {
	/// # Bug!
	Bug(&'static str),

	/// # Missing or unreadable input directory.
	Directory(PathBuf),

	/// # Unable to create the output directory.
	OutDir(PathBuf),

	/// # Unable to write a result file.
	Write(PathBuf),

	#[cfg(feature = "bin")]
	/// # Invalid CLI arg.
	CliArg(String),

	#[cfg(feature = "bin")]
	/// # CLI parsing failure.
	CliParse(&'static str),

	#[cfg(feature = "bin")]
	/// # Print Help (Not an Error).
	PrintHelp,

	#[cfg(feature = "bin")]
	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for TriageError {}

impl From<TriageError> for Msg {
	#[inline]
	fn from(src: TriageError) -> Self { Self::error(src.to_string()) }
}

impl fmt::Display for TriageError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bug(s) => write!(f, "Bug: {s}."),
			Self::Directory(p) => write!(f, "Unable to read directory {}.", p.display()),
			Self::OutDir(p) => write!(f, "Unable to create output directory {}.", p.display()),
			Self::Write(p) => write!(f, "Unable to write {}.", p.display()),

			#[cfg(feature = "bin")]
			Self::CliArg(s) => write!(f, "Invalid CLI option: {s}"),

			#[cfg(feature = "bin")]
			Self::CliParse(s) => write!(f, "Unable to parse {s}."),

			#[cfg(feature = "bin")]
			Self::PrintHelp => f.write_str("(help)"),

			#[cfg(feature = "bin")]
			Self::PrintVersion => f.write_str(concat!("Default Triage v", env!("CARGO_PKG_VERSION"))),
		}
	}
}
