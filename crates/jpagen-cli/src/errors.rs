//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use jpagen_entity::{ClassificationError, SynthesisError};
use jpagen_syntax::SyntaxError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Exit status for command-line usage errors.
const USAGE_EXIT_CODE: u8 = 2;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("{} already exists", path.display())]
    TargetFileAlreadyExists { path: PathBuf },
    #[error("no class body to insert the field into in {}", path.display())]
    InsertionPointNotFound { path: PathBuf },
    #[error("generated {what} does not parse: {detail}")]
    GeneratedSourceInvalid { what: &'static str, detail: String },
    #[error("failed to determine the working directory: {0}")]
    WorkingDirectory(io::Error),
    #[error("failed to write {}: {source}", path.display())]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("failed to emit output: {0}")]
    EmitOutput(io::Error),
}

impl AppError {
    /// Returns a stable name for the failure, recorded with its diagnostic.
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::LoadConfiguration(_) => "LoadConfiguration",
            Self::CliUsage(_) => "CliUsage",
            Self::Telemetry(_) => "Telemetry",
            Self::Classification(error) => error.kind(),
            Self::Synthesis(SynthesisError::InvalidFieldName { .. }) => "InvalidFieldName",
            Self::Synthesis(_) => "InvalidFieldType",
            Self::Syntax(_) => "Syntax",
            Self::TargetFileAlreadyExists { .. } => "TargetFileAlreadyExists",
            Self::InsertionPointNotFound { .. } => "InsertionPointNotFound",
            Self::GeneratedSourceInvalid { .. } => "GeneratedSourceInvalid",
            Self::WorkingDirectory(_) => "WorkingDirectory",
            Self::WriteFile { .. } => "WriteFile",
            Self::EmitOutput(_) => "EmitOutput",
        }
    }

    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::CliUsage(_) => ExitCode::from(USAGE_EXIT_CODE),
            _ => ExitCode::FAILURE,
        }
    }
}
