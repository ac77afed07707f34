//! User-visible diagnostics.
//!
//! Every report is recorded as a tracing event. Reports marked as user
//! visible are also written to stderr as `jpagen: <severity>: <message>`.

use std::io::Write;

use strum::Display;
use tracing::{error, info, warn};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Severity {
    Info,
    Warning,
    Error,
}

pub(crate) struct Diagnostics<'a, E: Write> {
    stderr: &'a mut E,
}

impl<'a, E: Write> Diagnostics<'a, E> {
    pub(crate) const fn new(stderr: &'a mut E) -> Self {
        Self { stderr }
    }

    /// Records `message`, echoing it to stderr when `user_visible` is set.
    pub(crate) fn report(
        &mut self,
        message: &str,
        kind: &str,
        severity: Severity,
        user_visible: bool,
    ) {
        match severity {
            Severity::Info => info!(kind, "{message}"),
            Severity::Warning => warn!(kind, "{message}"),
            Severity::Error => error!(kind, "{message}"),
        }

        if !user_visible {
            return;
        }
        if let Err(write_error) = writeln!(self.stderr, "jpagen: {severity}: {message}") {
            warn!(error = %write_error, "failed to write diagnostic to stderr");
        }
    }
}
