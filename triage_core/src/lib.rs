/*!
# Default Triage: Library
*/

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
	unsafe_code,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![expect(clippy::redundant_pub_crate, reason = "Unresolvable.")]

mod dedup;
mod error;
mod histogram;
mod info;
mod narrate;
mod opts;
mod score;
mod serialize;
mod trace;

pub use dedup::Group;
pub use error::TriageError;
pub use histogram::{
	Histogram,
	Occurrences,
};
pub use narrate::Narrator;
pub use opts::{
	EngineOptions,
	ScoreOptions,
};
pub use score::ScoreReport;
pub use trace::{
	load_traces,
	Trace,
	TraceSet,
};



/// # Run the Triage Engine End to End.
///
/// Loads both trace trees, runs the greedy deduplication loop, scores the
/// result against ground truth, and writes the group files plus summary
/// artefact to `opts.out_dir()`.
///
/// ## Errors
///
/// Returns an error if either input directory cannot be read, the output
/// directory cannot be created, or a result file cannot be written.
pub fn run(opts: &EngineOptions) -> Result<Vec<Group>, TriageError> {
	use dactyl::NiceU64;

	let mut narrator = match opts.log_file() {
		Some(path) => Narrator::with_log_file(path)?,
		None => Narrator::stderr_only(),
	};

	narrator.info(&format!("loading failing traces from {}", opts.crash_dir().display()));
	let failing = load_traces(opts.crash_dir())?;
	narrator.info(&format!("loading passing traces from {}", opts.non_crash_dir().display()));
	let passing = load_traces(opts.non_crash_dir())?;
	narrator.info(&format!(
		"{} failing, {} passing",
		NiceU64::from(failing.len() as u64), NiceU64::from(passing.len() as u64),
	));

	let groups = dedup::deduplicate(failing, &passing, &mut narrator);
	narrator.info(&format!("emitted {} group(s)", NiceU64::from(groups.len() as u64)));

	let report = score::analyze(&groups, true);
	serialize::write_groups(opts.out_dir(), &groups)?;
	serialize::write_summary(&opts.out_dir().join("summary"), &report)?;

	Ok(groups)
}

/// # Run the Standalone Scorer.
///
/// Re-reads an existing group-file directory and (re-)writes its summary
/// artefact.
///
/// ## Errors
///
/// Returns an error if `opts.group_dir()` cannot be read or the summary
/// file cannot be written.
pub fn score_existing(opts: &ScoreOptions) -> Result<ScoreReport, TriageError> {
	let groups = serialize::read_groups(opts.group_dir())?;
	let report = score::analyze(&groups, true);
	serialize::write_summary(opts.output_path(), &report)?;
	Ok(report)
}
