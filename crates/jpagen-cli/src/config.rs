//! Configuration loading helpers for the `jpagen` CLI.
//!
//! Configuration flags are peeled off the front of the argument list and
//! handed to `ortho_config`; the remaining tokens are parsed by clap as the
//! subcommand.

use std::ffi::{OsStr, OsString};

use jpagen_config::Config;
use ortho_config::OrthoConfig;

use crate::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Must stay in sync with the fields of [`Config`]. `--debug` is absent:
/// it is a global clap flag merged into the loaded configuration.
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--project-root",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// Configuration flags must appear before the subcommand. Flags that
    /// follow it are parsed as subcommand arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

impl OrthoConfigLoader {
    fn process_config_flag(argument: &OsStr) -> FlagAction {
        let argument_text = argument.to_string_lossy();
        let Some((flag, inline_value)) = split_flag(&argument_text) else {
            return FlagAction::Skip;
        };

        if CONFIG_CLI_FLAGS.contains(&flag) {
            FlagAction::Include {
                needs_value: !inline_value,
            }
        } else {
            FlagAction::Skip
        }
    }
}

/// Splits `--flag=value` into the flag and whether a value was inlined.
fn split_flag(argument: &str) -> Option<(&str, bool)> {
    if !argument.starts_with("--") {
        return None;
    }
    Some(
        argument
            .split_once('=')
            .map_or((argument, false), |(flag, _)| (flag, true)),
    )
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let mut arguments = args.iter();
    let Some(program) = arguments.next() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut filtered = vec![program.clone()];
    let mut command_start = 1usize;
    let mut pending_value = false;

    for argument in arguments {
        if pending_value {
            pending_value = false;
        } else {
            match OrthoConfigLoader::process_config_flag(argument) {
                FlagAction::Include { needs_value } => pending_value = needs_value,
                FlagAction::Skip => break,
            }
        }
        filtered.push(argument.clone());
        command_start += 1;
    }

    ConfigArgumentSplit {
        config_arguments: filtered,
        command_start,
    }
}
