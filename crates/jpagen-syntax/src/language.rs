//! Language detection and Tree-sitter grammar selection.
//!
//! This module provides the [`SupportedLanguage`] enum for identifying
//! source files the parser service understands and mapping them to their
//! Tree-sitter grammars.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Languages supported for structural analysis.
///
/// Each variant maps to a Tree-sitter grammar that can parse source code
/// for that language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// Java source files (`.java`).
    #[default]
    Java,
}

impl SupportedLanguage {
    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised.
    ///
    /// # Examples
    ///
    /// ```
    /// use jpagen_syntax::SupportedLanguage;
    ///
    /// assert_eq!(
    ///     SupportedLanguage::from_extension("java"),
    ///     Some(SupportedLanguage::Java)
    /// );
    /// assert_eq!(SupportedLanguage::from_extension("kt"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let normalised = ext.to_ascii_lowercase();
        match normalised.as_str() {
            "java" => Some(Self::Java),
            _ => None,
        }
    }

    /// Detects the language from a file path by examining its extension.
    ///
    /// Returns `None` if the path has no extension or the extension is not
    /// recognised.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the Tree-sitter language grammar for this language.
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::Java => tree_sitter_java::LANGUAGE.into(),
        }
    }

    /// Returns the lower-case identifier for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
        }
    }

    /// Returns the file extension used by sources in this language.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Java => "java",
        }
    }

    /// Returns all supported languages.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Java]
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for SupportedLanguage {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "java" => Ok(Self::Java),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("java")]
    #[case("JAVA")]
    #[case("Java")]
    fn from_extension_recognises_java(#[case] ext: &str) {
        assert_eq!(
            SupportedLanguage::from_extension(ext),
            Some(SupportedLanguage::Java)
        );
    }

    #[rstest]
    #[case("kt")]
    #[case("class")]
    #[case("jar")]
    fn from_extension_returns_none_for_unknown(#[case] ext: &str) {
        assert_eq!(SupportedLanguage::from_extension(ext), None);
    }

    #[rstest]
    #[case("src/main/java/com/example/Order.java", Some(SupportedLanguage::Java))]
    #[case("build.gradle", None)]
    #[case("Makefile", None)]
    fn from_path_extracts_extension(
        #[case] path_str: &str,
        #[case] expected: Option<SupportedLanguage>,
    ) {
        assert_eq!(SupportedLanguage::from_path(Path::new(path_str)), expected);
    }

    #[test]
    fn from_str_parses_language_names() {
        assert_eq!(
            SupportedLanguage::from_str(" Java "),
            Ok(SupportedLanguage::Java)
        );
    }

    #[test]
    fn from_str_returns_error_for_unknown() {
        let result: Result<SupportedLanguage, _> = "kotlin".parse();
        let error = result.expect_err("kotlin is not supported");
        assert_eq!(error.input(), "kotlin");
    }
}
