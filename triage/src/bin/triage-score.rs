/*!
# Default Triage: Standalone Scorer Binary
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
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



use argyle::{
	Argue,
	ArgyleError,
	FLAG_HELP,
	FLAG_VERSION,
};
use fyi_msg::Msg;
use std::path::PathBuf;
use triage_core::{
	ScoreOptions,
	TriageError,
};

/// # Main.
fn main() {
	match _main() {
		Ok(()) => {},
		Err(TriageError::PrintVersion) => {
			println!(concat!("triage-score v", env!("CARGO_PKG_VERSION")));
		},
		Err(TriageError::PrintHelp) => { helper(); },
		Err(e) => {
			Msg::from(e).eprint();
			std::process::exit(1);
		},
	}
}

#[inline]
/// # Actual Main.
fn _main() -> Result<(), TriageError> {
	let args = Argue::new(FLAG_HELP | FLAG_VERSION).map_err(from_argyle)?;

	let group_path: PathBuf = args.arg(0)
		.and_then(|v| std::str::from_utf8(v).ok())
		.map(PathBuf::from)
		.ok_or(TriageError::CliParse("group_path"))?;
	let output_path = args.option2(b"-o", b"--output_path")
		.map_or_else(
			|| Ok(group_path.join("summary")),
			|v| std::str::from_utf8(v)
				.map(PathBuf::from)
				.map_err(|_| TriageError::CliArg(String::from_utf8_lossy(v).into_owned())),
		)?;

	let opts = ScoreOptions::new(group_path, output_path);
	let report = triage_core::score_existing(&opts)?;
	eprintln!(
		"Scored {} cluster(s); wrote summary to {}.",
		dactyl::NiceU64::from(report.num_clusters as u64),
		opts.output_path().display(),
	);

	Ok(())
}

/// # Translate an Argyle Parsing Failure.
const fn from_argyle(e: ArgyleError) -> TriageError {
	match e {
		ArgyleError::WantsVersion => TriageError::PrintVersion,
		ArgyleError::WantsHelp => TriageError::PrintHelp,
		_ => TriageError::CliParse("arguments"),
	}
}

#[cold]
/// # Print Help.
fn helper() {
	println!(concat!(
		r#"
triage-score v"#, env!("CARGO_PKG_VERSION"), r#"
Ground-truth scoring for an existing group-file directory.

USAGE:
    triage-score <GROUP_PATH> [-o <PATH>]

ARGS:
    <GROUP_PATH>          Path to a directory of group files (the `summary`
                          entry, if present, is ignored).

OPTIONS:
    -o, --output_path <PATH>
                          Path to the file that will receive the summary.
                          [default: <GROUP_PATH>/summary]
    -h, --help            Print help information to STDOUT and exit.
    -V, --version         Print version information to STDOUT and exit.
"#,
	));
}
