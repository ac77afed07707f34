//! Shared configuration for the `jpagen` command-line tool.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then a
//! TOML file (discovered or given with `--config-path`), then `JPAGEN_*`
//! environment variables, then command-line flags. Later layers win.

mod defaults;
mod logging;

use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEBUG_LOG_FILTER, DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use logging::LogFormat;

/// Resolved configuration for a `jpagen` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "JPAGEN")]
pub struct Config {
    /// Tracing filter directive, for example `info` or `jpagen_entity=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,

    /// Output format for diagnostics written to stderr.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,

    /// Directory scanned when resolving superclasses. Defaults to the
    /// current working directory.
    #[serde(default)]
    pub project_root: Option<Utf8PathBuf>,

    /// Raises the log level to `debug` unless a filter was configured.
    #[serde(default)]
    #[ortho_config(default = false)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            project_root: None,
            debug: false,
        }
    }
}

impl Config {
    /// Returns the configured log filter.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the filter to install, taking `debug` into account.
    ///
    /// `debug` only raises the default filter; an explicitly configured
    /// filter is kept as is.
    #[must_use]
    pub fn effective_log_filter(&self) -> &str {
        if self.debug && self.log_filter == DEFAULT_LOG_FILTER {
            DEBUG_LOG_FILTER
        } else {
            &self.log_filter
        }
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the configured project root, if any.
    #[must_use]
    pub fn project_root(&self) -> Option<&Utf8PathBuf> {
        self.project_root.as_ref()
    }

    /// Returns the project root, falling back to `working_dir`.
    #[must_use]
    pub fn resolve_project_root(&self, working_dir: &Path) -> PathBuf {
        self.project_root.as_ref().map_or_else(
            || working_dir.to_path_buf(),
            |root| root.as_std_path().to_path_buf(),
        )
    }

    /// Returns whether debug diagnostics were requested.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }
}
