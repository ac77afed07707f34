//! Tree-sitter powered parsing and structural queries for `jpagen`.
//!
//! This crate is the parser service and query engine underneath the entity
//! analysis:
//!
//! - **Parsing** via [`Parser`], producing an immutable [`ParseResult`] that
//!   tolerates syntax errors
//! - **Structural queries** via [`QueryPattern`], which runs a declarative
//!   Tree-sitter query and yields labelled [`Capture`]s in document order
//!
//! # Supported Languages
//!
//! Currently supports Java (`.java`).
//!
//! # Example
//!
//! ```
//! use jpagen_syntax::{CaptureLabel, Parser, QueryPattern, has_term};
//!
//! static CLASS_MARKERS: QueryPattern = QueryPattern::new(
//!     "(class_declaration (modifiers (marker_annotation name: (identifier) @annotation_name)))",
//! );
//!
//! let mut parser = Parser::java()?;
//! let parsed = parser.parse("@Entity public class Order {}")?;
//! let captures = CLASS_MARKERS.captures(&parsed)?;
//! assert!(has_term(&captures, "Entity"));
//! # Ok::<(), jpagen_syntax::SyntaxError>(())
//! ```

mod error;
mod language;
mod parser;
mod position;
mod query;

pub use error::SyntaxError;
pub use language::{LanguageParseError, SupportedLanguage};
pub use parser::{FRAGMENT_CLASS_NAME, ParseResult, Parser, SyntaxErrorInfo, node_text};
pub use position::LineColumn;
pub use query::{Capture, CaptureLabel, QueryPattern, first_text, has_term, texts};

/// Re-exported so callers can walk nodes without naming the dependency.
pub use tree_sitter::Node;

#[cfg(test)]
mod tests;
