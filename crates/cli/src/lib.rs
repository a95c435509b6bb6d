#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `svcperm` command line. `grant` ensures one or more
//! principals hold a set of rights on a service or file; `show` prints the
//! current DACL.
//!
//! # Design
//!
//! [`run`] takes the argument iterator together with handles for standard
//! output and error, so tests drive it in-process with `Vec<u8>` buffers.
//! Parsing is done by a [`clap`](https://docs.rs/clap/) derive definition in
//! [`Cli`]. Each principal named on the command line gets its own
//! read-merge-write cycle through [`security::PermissionEditor`].
//!
//! # Errors
//!
//! Usage errors exit with `1`. Adapter errors are printed on stderr and
//! mapped through [`ExitCode::for_error`]. All principals are resolved before
//! the first read, so an unknown name never leaves a partial grant behind.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["svcperm", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("svcperm"));
//! ```

mod args;
mod exit_code;
mod render;

use std::ffi::OsString;
use std::io::Write;

use acl::GrantRequest;
use clap::Parser;
use clap::error::ErrorKind;
use logging::VerbosityConfig;
use security::{
    BlobProvider, GrantOptions, IdentityResolver, NativeProvider, ObjectKind, PermissionEditor,
    SecurityError, SecurityInfoProvider, WellKnownResolver,
};

pub use args::{Cli, Command, DEFAULT_PRINCIPAL, DEFAULT_RIGHT, GrantArgs, Kind, Right, ShowArgs, TargetArgs};
pub use exit_code::{ExitCode, exit_code_from};
pub use render::{write_acl, write_report};

/// Program name used in diagnostics.
pub const PROGRAM_NAME: &str = "svcperm";

/// Runs the CLI and returns the process exit code.
#[allow(clippy::module_name_repetitions)]
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let cli = match Cli::try_parse_from(arguments) {
        Ok(cli) => cli,
        Err(error) => {
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(stdout, "{}", error.render()).is_err() {
                        return ExitCode::Failure.as_i32();
                    }
                    ExitCode::Ok.as_i32()
                }
                _ => {
                    let _ = write!(stderr, "{}", error.render());
                    ExitCode::Usage.as_i32()
                }
            };
        }
    };

    let verbosity = VerbosityConfig::from_verbose_level(cli.verbose).with_quiet(cli.quiet);
    logging::init_tracing(&verbosity);

    let status = match cli.command {
        Command::Grant(args) => grant(&args, stdout, stderr),
        Command::Show(args) => show(&args, stdout, stderr),
    };
    status.as_i32()
}

fn provider_for(target: &TargetArgs) -> Box<dyn SecurityInfoProvider> {
    match &target.blob_dir {
        Some(dir) => Box::new(BlobProvider::new(dir)),
        None => Box::new(NativeProvider::new()),
    }
}

fn report_error<Err: Write>(stderr: &mut Err, error: &SecurityError) -> ExitCode {
    let _ = writeln!(stderr, "{PROGRAM_NAME}: error: {error}");
    ExitCode::for_error(error)
}

fn grant<Out: Write, Err: Write>(args: &GrantArgs, stdout: &mut Out, stderr: &mut Err) -> ExitCode {
    let resolver = WellKnownResolver;
    let mut principals = Vec::new();
    for name in args.principal_names() {
        match resolver.resolve(name) {
            Ok(sid) => {
                tracing::debug!(target: "svcperm::cli", name, principal = %sid, "resolved principal");
                principals.push(sid);
            }
            Err(error) => {
                let status = report_error(stderr, &error);
                let known: Vec<&str> = WellKnownResolver::aliases().collect();
                let _ = writeln!(
                    stderr,
                    "{PROGRAM_NAME}: principals are SIDs (S-1-...) or one of: {}",
                    known.join(", ")
                );
                return status;
            }
        }
    }

    let options = GrantOptions {
        kind: ObjectKind::from(args.target.kind),
        dry_run: args.dry_run,
    };
    let editor = PermissionEditor::new(provider_for(&args.target), options);
    let mask = args.mask();

    for principal in principals {
        let request = GrantRequest::new(principal, mask);
        match editor.grant(&args.object, &request) {
            Ok(report) => {
                if write_report(stdout, &report).is_err() {
                    return ExitCode::Failure;
                }
            }
            Err(error) => return report_error(stderr, &error),
        }
    }
    ExitCode::Ok
}

fn show<Out: Write, Err: Write>(args: &ShowArgs, stdout: &mut Out, stderr: &mut Err) -> ExitCode {
    let options = GrantOptions {
        kind: ObjectKind::from(args.target.kind),
        dry_run: true,
    };
    let editor = PermissionEditor::new(provider_for(&args.target), options);

    match editor.read_list(&args.object) {
        Ok(list) => {
            if write_acl(stdout, &list).is_err() {
                return ExitCode::Failure;
            }
            ExitCode::Ok
        }
        Err(error) => report_error(stderr, &error),
    }
}

#[cfg(test)]
mod tests;
