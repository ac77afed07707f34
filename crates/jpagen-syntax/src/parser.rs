//! Tree-sitter parsing wrapper with error recovery.
//!
//! This module provides the parser service used by every structural query:
//! it wraps the raw Tree-sitter parser and provides structured access to
//! parse results and syntax errors. Trees are immutable once produced; an
//! edited buffer is simply parsed again.

use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::position::point_to_one_based;

/// Name of the synthetic class used to parse member fragments standalone.
pub const FRAGMENT_CLASS_NAME: &str = "__JpagenFragment";

/// Result of parsing source code.
///
/// Contains the parsed syntax tree along with the source it was produced
/// from. Tree-sitter is error-tolerant, so a parse result may contain both a
/// usable tree and error nodes; queries simply yield nothing for sections
/// that failed to parse.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// Returns the parsed syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the source code that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the language of the parsed code.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns the exact source slice covered by `node`.
    ///
    /// Nodes from a different tree may point outside this source; those
    /// yield an empty string rather than panicking.
    #[must_use]
    pub fn text(&self, node: tree_sitter::Node<'_>) -> &str {
        node_text(node, &self.source)
    }

    /// Returns whether the parse result contains any syntax errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        has_error_nodes(self.tree.root_node())
    }

    /// Collects all syntax errors found in the parse result.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &self.source, &mut errors);
        errors
    }
}

/// Returns the slice of `source` covered by `node`.
#[must_use]
pub fn node_text<'s>(node: tree_sitter::Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Information about a syntax error found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// Line number (one-based) where the error starts.
    pub line: u32,
    /// Column number (one-based) where the error starts.
    pub column: u32,
    /// A snippet of the problematic source text.
    pub context: String,
    /// Human-readable description of the error.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str) -> Self {
        let byte_range = node.byte_range();

        // Long error regions are truncated to keep diagnostics on one line.
        let context = source
            .get(byte_range.clone())
            .map(|s| {
                if s.len() > 50 {
                    let truncated: String = s.chars().take(47).collect();
                    format!("{truncated}...")
                } else {
                    s.to_owned()
                }
            })
            .unwrap_or_default();

        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "syntax error".to_owned()
        };

        let (line, column) = point_to_one_based(node.start_position());

        Self {
            byte_range,
            line,
            column,
            context,
            message,
        }
    }
}

/// Tree-sitter parser wrapper for a specific language.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a new parser for the given language.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter parser cannot be initialised
    /// with the language grammar.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.tree_sitter_language())
            .map_err(|e| SyntaxError::parser_init(language, e.to_string()))?;

        Ok(Self { inner, language })
    }

    /// Creates a Java parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the Java grammar cannot be loaded.
    pub fn java() -> Result<Self, SyntaxError> {
        Self::new(SupportedLanguage::Java)
    }

    /// Returns the language this parser is configured for.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Parses source code and returns the result.
    ///
    /// Invalid source still produces a result; use
    /// [`ParseResult::has_errors`] to check for errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree. This
    /// is rare and typically indicates a parser configuration issue.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse(self.language, "parsing failed"))?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }

    /// Parses raw buffer bytes, replacing invalid UTF-8 sequences.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree.
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> Result<ParseResult, SyntaxError> {
        let source = String::from_utf8_lossy(bytes);
        self.parse(&source)
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Io`] when the file cannot be read, or a parse
    /// error if no tree is produced.
    pub fn parse_file(&mut self, path: &Path) -> Result<ParseResult, SyntaxError> {
        let bytes = fs::read(path).map_err(|source| SyntaxError::io(path, source))?;
        self.parse_bytes(&bytes)
    }

    /// Parses a class member fragment (such as a field declaration) by
    /// wrapping it in a synthetic class named [`FRAGMENT_CLASS_NAME`].
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree.
    pub fn parse_class_member(&mut self, fragment: &str) -> Result<ParseResult, SyntaxError> {
        let wrapped = format!("class {FRAGMENT_CLASS_NAME} {{\n{fragment}\n}}\n");
        self.parse(&wrapped)
    }
}

fn has_error_nodes(node: tree_sitter::Node<'_>) -> bool {
    if node.is_error() || node.is_missing() {
        return true;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if has_error_nodes(child) {
            return true;
        }
    }

    false
}

fn collect_error_nodes(
    node: tree_sitter::Node<'_>,
    source: &str,
    errors: &mut Vec<SyntaxErrorInfo>,
) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node, source));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, source, errors);
    }
}
