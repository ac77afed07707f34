//! Sinks for generated source: new files, rewritten files and stdout.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use jpagen_syntax::ParseResult;
use tracing::warn;

use crate::AppError;

/// Creates `path` with `contents`, refusing to replace an existing file.
///
/// The check and the creation are a single `create_new` open, so a file
/// that appears concurrently is reported as already existing. A file whose
/// contents cannot be written is removed again.
pub(crate) fn create_new_file(path: &Path, contents: &str) -> Result<(), AppError> {
    create_new_file_with(path, contents, write_contents::<File>)
}

fn create_new_file_with<F>(path: &Path, contents: &str, write: F) -> Result<(), AppError>
where
    F: FnOnce(File, &str) -> io::Result<()>,
{
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => AppError::TargetFileAlreadyExists {
                path: path.to_path_buf(),
            },
            _ => AppError::WriteFile {
                path: path.to_path_buf(),
                source,
            },
        })?;
    if let Err(source) = write(file, contents) {
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "failed to remove partial file");
        }
        return Err(AppError::WriteFile {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn write_contents<W: Write>(mut sink: W, contents: &str) -> io::Result<()> {
    sink.write_all(contents.as_bytes())?;
    sink.flush()
}

/// Replaces the contents of an existing file.
pub(crate) fn rewrite_file(path: &Path, contents: &str) -> Result<(), AppError> {
    fs::write(path, contents).map_err(|source| AppError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes generated text to `stdout` unchanged.
pub(crate) fn emit<W: Write>(stdout: &mut W, contents: &str) -> Result<(), AppError> {
    stdout
        .write_all(contents.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(AppError::EmitOutput)
}

/// Fails when the parser reports errors in generated text.
pub(crate) fn ensure_parses(parsed: &ParseResult, what: &'static str) -> Result<(), AppError> {
    match parsed.errors().first() {
        None => Ok(()),
        Some(error) => Err(AppError::GeneratedSourceInvalid {
            what,
            detail: format!("{} at {}:{}", error.message, error.line, error.column),
        }),
    }
}
