/*!
# Default Triage: Engine Binary
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
use triage_core::{
	EngineOptions,
	TriageError,
};

/// # Main.
fn main() {
	match _main() {
		Ok(()) => {},
		Err(TriageError::PrintVersion) => {
			println!(concat!("Default Triage v", env!("CARGO_PKG_VERSION")));
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

	let crash_dir = args.option2(b"-c", b"--crash_dir")
		.ok_or(TriageError::CliParse("-c/--crash_dir"))?;
	let non_crash_dir = args.option2(b"-n", b"--non_crash_dir")
		.ok_or(TriageError::CliParse("-n/--non_crash_dir"))?;
	let out_dir = args.option2(b"-o", b"--out_dir")
		.ok_or(TriageError::CliParse("-o/--out_dir"))?;

	let mut opts = EngineOptions::new(
		path_from_bytes(crash_dir)?,
		path_from_bytes(non_crash_dir)?,
		path_from_bytes(out_dir)?,
	);
	if let Some(log_file) = args.option2(b"-l", b"--log_file") {
		opts = opts.with_log_file(path_from_bytes(log_file)?);
	}

	eprintln!("Starting triage run at {}.", utc2k::FmtUtc2k::now());
	let groups = triage_core::run(&opts)?;
	eprintln!(
		"Emitted {} group(s) to {}.",
		dactyl::NiceU64::from(groups.len() as u64),
		opts.out_dir().display(),
	);

	Ok(())
}

/// # Decode an Argument as a Path.
fn path_from_bytes(raw: &[u8]) -> Result<std::path::PathBuf, TriageError> {
	std::str::from_utf8(raw)
		.map(std::path::PathBuf::from)
		.map_err(|_| TriageError::CliArg(String::from_utf8_lossy(raw).into_owned()))
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
Default Triage v"#, env!("CARGO_PKG_VERSION"), r#"
Crash triage by trace deduplication.

USAGE:
    triage [OPTIONS]

REQUIRED:
    -c, --crash_dir <PATH>      Path to a directory tree of crashing-input
                                 traces.
    -n, --non_crash_dir <PATH>  Path to a directory tree of non-crashing-input
                                 traces.
    -o, --out_dir <PATH>        Path to the directory that will receive the
                                 group files and summary.

OPTIONS:
    -l, --log_file <PATH>       Path to an optional log file; narration is
                                 duplicated there when given.
    -h, --help                  Print help information to STDOUT and exit.
    -V, --version               Print version information to STDOUT and exit.
"#,
	));
}
