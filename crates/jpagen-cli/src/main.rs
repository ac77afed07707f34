//! CLI entrypoint for `jpagen`.
//!
//! The binary delegates to [`jpagen_cli::run`], which loads configuration,
//! parses the subcommand, and writes generated sources.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    jpagen_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
