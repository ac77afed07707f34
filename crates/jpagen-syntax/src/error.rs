//! Error types for parsing and structural query operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors from parsing and structural query operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInit {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// The parser did not produce a syntax tree.
    #[error("failed to parse {language}: {message}")]
    Parse {
        /// The language that failed to parse.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// A query pattern was rejected by the Tree-sitter query compiler.
    #[error("invalid query for {language}: {message}")]
    QueryCompile {
        /// The language the query was compiled for.
        language: SupportedLanguage,
        /// Description of the compilation failure.
        message: String,
    },

    /// A query pattern uses a capture name with no matching label.
    #[error("query captures unknown label '@{name}'")]
    UnknownCaptureLabel {
        /// The capture name found in the pattern.
        name: String,
    },

    /// Reading a source file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInit {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::Parse {
            language,
            message: message.into(),
        }
    }

    /// Creates a query compilation error.
    #[must_use]
    pub fn query_compile(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::QueryCompile {
            language,
            message: message.into(),
        }
    }

    /// Creates an unknown capture label error.
    #[must_use]
    pub fn unknown_capture_label(name: impl Into<String>) -> Self {
        Self::UnknownCaptureLabel { name: name.into() }
    }

    /// Creates a file read error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
