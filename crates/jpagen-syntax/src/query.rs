//! Declarative structural queries over parsed syntax trees.
//!
//! A [`QueryPattern`] holds a Tree-sitter query source and compiles it the
//! first time it is run. Patterns are stateless apart from that cache, so
//! they are normally declared as `static` items and shared across every tree
//! a command touches.
//!
//! Running a pattern yields [`Capture`]s in document order. Every capture
//! name used by a pattern must correspond to a [`CaptureLabel`]; consumers
//! match on the label rather than on raw capture names.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use streaming_iterator::StreamingIterator;
use tracing::trace;
use tree_sitter::{Node, Query, QueryCursor};

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::parser::{ParseResult, node_text};
use crate::position::LineColumn;

/// The closed set of labels a query may capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureLabel {
    /// The name of an annotation (`@annotation_name`).
    AnnotationName,
    /// The name of a class declaration (`@class_name`).
    ClassName,
    /// The type named in an `extends` clause (`@superclass_name`).
    SuperclassName,
    /// The name in a package declaration (`@package_name`).
    PackageName,
}

impl CaptureLabel {
    /// Returns the capture name used inside query sources.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnnotationName => "annotation_name",
            Self::ClassName => "class_name",
            Self::SuperclassName => "superclass_name",
            Self::PackageName => "package_name",
        }
    }

    /// Returns every label.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::AnnotationName,
            Self::ClassName,
            Self::SuperclassName,
            Self::PackageName,
        ]
    }
}

impl fmt::Display for CaptureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl FromStr for CaptureLabel {
    type Err = SyntaxError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|label| label.as_str() == name)
            .ok_or_else(|| SyntaxError::unknown_capture_label(name))
    }
}

/// A labelled node produced by running a [`QueryPattern`].
#[derive(Debug, Clone, Copy)]
pub struct Capture<'tree> {
    node: Node<'tree>,
    label: CaptureLabel,
    text: &'tree str,
}

impl<'tree> Capture<'tree> {
    /// Returns the captured node.
    #[must_use]
    pub const fn node(&self) -> Node<'tree> {
        self.node
    }

    /// Returns the label the node was captured under.
    #[must_use]
    pub const fn label(&self) -> CaptureLabel {
        self.label
    }

    /// Returns the source text of the captured node.
    #[must_use]
    pub const fn text(&self) -> &'tree str {
        self.text
    }

    /// Returns the one-based start position of the capture.
    #[must_use]
    pub fn position(&self) -> LineColumn {
        LineColumn::from_point(self.node.start_position())
    }
}

/// A lazily compiled structural query.
///
/// # Examples
///
/// ```
/// use jpagen_syntax::{CaptureLabel, Parser, QueryPattern};
///
/// static CLASS_NAMES: QueryPattern =
///     QueryPattern::new("(class_declaration name: (identifier) @class_name)");
///
/// let mut parser = Parser::java()?;
/// let parsed = parser.parse("class Order {}")?;
/// let captures = CLASS_NAMES.captures(&parsed)?;
/// assert_eq!(captures[0].label(), CaptureLabel::ClassName);
/// assert_eq!(captures[0].text(), "Order");
/// # Ok::<(), jpagen_syntax::SyntaxError>(())
/// ```
pub struct QueryPattern {
    source: &'static str,
    language: SupportedLanguage,
    compiled: OnceCell<CompiledQuery>,
}

struct CompiledQuery {
    query: Query,
    labels: Vec<CaptureLabel>,
}

impl QueryPattern {
    /// Declares a Java query pattern without compiling it.
    #[must_use]
    pub const fn new(source: &'static str) -> Self {
        Self::for_language(source, SupportedLanguage::Java)
    }

    /// Declares a query pattern for an explicit language.
    #[must_use]
    pub const fn for_language(source: &'static str, language: SupportedLanguage) -> Self {
        Self {
            source,
            language,
            compiled: OnceCell::new(),
        }
    }

    /// Returns the query source.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        self.source
    }

    /// Returns the language the query targets.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Compiles the pattern if it has not been compiled yet.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::QueryCompile`] when Tree-sitter rejects the
    /// source, or [`SyntaxError::UnknownCaptureLabel`] when the pattern
    /// captures a name outside [`CaptureLabel`].
    pub fn compile(&self) -> Result<(), SyntaxError> {
        self.compiled().map(|_| ())
    }

    /// Runs the pattern over a whole parse result.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn captures<'a>(&self, parsed: &'a ParseResult) -> Result<Vec<Capture<'a>>, SyntaxError> {
        self.captures_in(parsed.root_node(), parsed.source())
    }

    /// Runs the pattern over the subtree rooted at `node`.
    ///
    /// `source` must be the text the node's tree was parsed from.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn captures_in<'a>(
        &self,
        node: Node<'a>,
        source: &'a str,
    ) -> Result<Vec<Capture<'a>>, SyntaxError> {
        let compiled = self.compiled()?;
        let mut cursor = QueryCursor::new();
        let mut stream = cursor.captures(&compiled.query, node, source.as_bytes());

        let mut captures = Vec::new();
        while let Some((query_match, index)) = stream.next() {
            let Some(capture) = query_match.captures.get(*index) else {
                continue;
            };
            let label = usize::try_from(capture.index)
                .ok()
                .and_then(|slot| compiled.labels.get(slot))
                .copied();
            let Some(label) = label else {
                continue;
            };
            captures.push(Capture {
                node: capture.node,
                label,
                text: node_text(capture.node, source),
            });
        }

        trace!(
            pattern = self.source,
            captures = captures.len(),
            "structural query executed"
        );
        Ok(captures)
    }

    fn compiled(&self) -> Result<&CompiledQuery, SyntaxError> {
        self.compiled
            .get_or_try_init(|| CompiledQuery::compile(self.source, self.language))
    }
}

impl fmt::Debug for QueryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryPattern")
            .field("source", &self.source)
            .field("language", &self.language)
            .field("compiled", &self.compiled.get().is_some())
            .finish()
    }
}

impl CompiledQuery {
    fn compile(source: &str, language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let query = Query::new(&language.tree_sitter_language(), source)
            .map_err(|error| SyntaxError::query_compile(language, error.to_string()))?;
        let labels = query
            .capture_names()
            .iter()
            .map(|name| name.parse::<CaptureLabel>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { query, labels })
    }
}

/// Returns whether any capture's text equals `term`.
#[must_use]
pub fn has_term(captures: &[Capture<'_>], term: &str) -> bool {
    captures.iter().any(|capture| capture.text() == term)
}

/// Returns the text of the first capture carrying `label`.
#[must_use]
pub fn first_text<'a>(captures: &[Capture<'a>], label: CaptureLabel) -> Option<&'a str> {
    captures
        .iter()
        .find(|capture| capture.label() == label)
        .map(Capture::text)
}

/// Returns the texts of every capture carrying `label`, in document order.
#[must_use]
pub fn texts<'a>(captures: &[Capture<'a>], label: CaptureLabel) -> Vec<&'a str> {
    captures
        .iter()
        .filter(|capture| capture.label() == label)
        .map(Capture::text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use rstest::rstest;

    static CLASS_NAMES: QueryPattern =
        QueryPattern::new("(class_declaration name: (identifier) @class_name)");

    fn parse(source: &str) -> ParseResult {
        Parser::java()
            .expect("parser init")
            .parse(source)
            .expect("parse")
    }

    #[rstest]
    #[case("annotation_name", CaptureLabel::AnnotationName)]
    #[case("class_name", CaptureLabel::ClassName)]
    #[case("superclass_name", CaptureLabel::SuperclassName)]
    #[case("package_name", CaptureLabel::PackageName)]
    fn labels_parse_from_capture_names(#[case] name: &str, #[case] expected: CaptureLabel) {
        assert_eq!(name.parse::<CaptureLabel>().ok(), Some(expected));
        assert_eq!(expected.as_str(), name);
    }

    #[test]
    fn captures_follow_document_order() {
        let parsed = parse("class A {}\nclass B {}\nclass C {}");
        let captures = CLASS_NAMES.captures(&parsed).expect("query");

        assert_eq!(texts(&captures, CaptureLabel::ClassName), vec!["A", "B", "C"]);
    }

    #[test]
    fn captures_are_not_deduplicated() {
        let parsed = parse("class A {}\nclass A {}");
        let captures = CLASS_NAMES.captures(&parsed).expect("query");

        assert_eq!(captures.len(), 2);
    }

    #[test]
    fn captures_in_is_scoped_to_the_subtree() {
        let parsed = parse("class Outer { class Inner {} }\nclass Sibling {}");
        let outer = parsed.root_node().named_child(0).expect("outer class");
        let captures = CLASS_NAMES
            .captures_in(outer, parsed.source())
            .expect("query");

        assert_eq!(
            texts(&captures, CaptureLabel::ClassName),
            vec!["Outer", "Inner"]
        );
    }

    #[test]
    fn broken_source_yields_partial_captures() {
        let parsed = parse("class Complete {}\nclass Broken {");
        let captures = CLASS_NAMES.captures(&parsed).expect("query");

        assert!(has_term(&captures, "Complete"));
    }

    #[test]
    fn invalid_query_is_reported() {
        static BROKEN: QueryPattern = QueryPattern::new("(class_declaration name: (");
        let error = BROKEN.compile().expect_err("query must fail");

        assert!(matches!(error, SyntaxError::QueryCompile { .. }));
    }

    #[test]
    fn unknown_capture_names_are_rejected() {
        static UNKNOWN: QueryPattern =
            QueryPattern::new("(class_declaration name: (identifier) @whatever)");
        let error = UNKNOWN.compile().expect_err("label must be rejected");

        assert!(matches!(error, SyntaxError::UnknownCaptureLabel { ref name } if name == "whatever"));
    }

    #[test]
    fn first_text_and_has_term_inspect_capture_text() {
        let parsed = parse("class Order {}");
        let captures = CLASS_NAMES.captures(&parsed).expect("query");

        assert_eq!(first_text(&captures, CaptureLabel::ClassName), Some("Order"));
        assert_eq!(first_text(&captures, CaptureLabel::PackageName), None);
        assert!(has_term(&captures, "Order"));
        assert!(!has_term(&captures, "order"));
    }

    #[test]
    fn capture_position_is_one_based() {
        let parsed = parse("\nclass Order {}");
        let captures = CLASS_NAMES.captures(&parsed).expect("query");
        let position = captures.first().expect("capture").position();

        assert_eq!(position, LineColumn { line: 2, column: 7 });
    }
}
