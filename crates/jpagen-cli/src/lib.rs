//! Command-line runtime for `jpagen`.
//!
//! The runner splits configuration flags from the subcommand, loads layered
//! configuration, installs telemetry, and dispatches to the generators.
//! Configuration loading and the IO streams can be substituted in tests.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod config;
mod diagnostics;
mod errors;
mod output;
mod telemetry;

use cli::Cli;
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
use diagnostics::{Diagnostics, Severity};
pub(crate) use errors::AppError;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct CliRunner<'a, 'io, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, W, E>,
    loader: &'a L,
}

impl<'a, 'io, W, E, L> CliRunner<'a, 'io, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'a mut IoStreams<'io, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let cli = match Cli::try_parse_from(cli_arguments) {
            Ok(parsed) => parsed,
            Err(error) => return self.report_usage(error),
        };

        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|mut config| {
                config.debug |= cli.debug;
                telemetry::initialise(&config)?;
                let working_dir = std::env::current_dir().map_err(AppError::WorkingDirectory)?;
                let project_root = config.resolve_project_root(&working_dir);
                commands::execute(cli.command, &project_root, self.io)
            });

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                Diagnostics::new(self.io.stderr).report(
                    &error.to_string(),
                    error.kind(),
                    Severity::Error,
                    true,
                );
                error.exit_code()
            }
        }
    }

    /// Writes clap's rendered message. Help and version requests succeed;
    /// anything else is a usage error.
    fn report_usage(&mut self, error: clap::Error) -> ExitCode {
        let rendered = error.render().to_string();
        let written = if error.use_stderr() {
            self.io.stderr.write_all(rendered.as_bytes())
        } else {
            self.io.stdout.write_all(rendered.as_bytes())
        };
        if written.is_err() {
            return ExitCode::FAILURE;
        }
        if error.use_stderr() {
            AppError::CliUsage(error).exit_code()
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.get(split.command_start..).unwrap_or_default())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests;
