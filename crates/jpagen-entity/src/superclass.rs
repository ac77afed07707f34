//! Superclass extraction and cross-file class lookup.

use std::path::{Path, PathBuf};

use jpagen_syntax::{
    CaptureLabel, Node, ParseResult, Parser, QueryPattern, SyntaxError, first_text, has_term,
};
use tracing::{debug, warn};

use crate::identifier::{class_declarations, class_name};
use crate::project::ProjectTree;

static SUPERCLASS: QueryPattern = QueryPattern::new(
    r"(superclass
        [
          (type_identifier) @superclass_name
          (generic_type (type_identifier) @superclass_name)
          (generic_type (scoped_type_identifier (type_identifier) @superclass_name .))
          (scoped_type_identifier (type_identifier) @superclass_name .)
        ])",
);

static TOP_LEVEL_CLASSES: QueryPattern =
    QueryPattern::new("(program (class_declaration name: (identifier) @class_name))");

/// Returns the simple name of the class that the class declaration `class`
/// extends.
///
/// Type arguments and package qualifiers are stripped: `extends Base<Long>`,
/// `extends com.example.Base` and `extends com.example.Base<Long>` all yield
/// `Base`. Only the class's own `extends` clause is read; nested classes are
/// never consulted.
///
/// # Errors
///
/// Returns an error if the query cannot be compiled.
pub fn superclass_name(class: Node<'_>, source: &str) -> Result<Option<String>, SyntaxError> {
    let Some(clause) = class.child_by_field_name("superclass") else {
        debug!("class has no extends clause");
        return Ok(None);
    };
    let captures = SUPERCLASS.captures_in(clause, source)?;
    let found = first_text(&captures, CaptureLabel::SuperclassName).map(str::to_owned);
    debug!(superclass = ?found, "superclass extraction");
    Ok(found)
}

/// A parsed source file that declares a looked-up class.
#[derive(Debug)]
pub struct LocatedClass {
    path: PathBuf,
    name: String,
    parsed: ParseResult,
}

impl LocatedClass {
    /// Returns the path of the declaring file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the simple class name that was looked up.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parsed declaring file.
    #[must_use]
    pub const fn parsed(&self) -> &ParseResult {
        &self.parsed
    }

    /// Returns the top-level declaration of the class, falling back to the
    /// whole file when it cannot be singled out.
    #[must_use]
    pub fn class_node(&self) -> Node<'_> {
        let source = self.parsed.source();
        class_declarations(self.parsed.root_node())
            .into_iter()
            .find(|class| class_name(*class, source) == Some(self.name.as_str()))
            .unwrap_or_else(|| self.parsed.root_node())
    }
}

/// Returns whether `parsed` declares a top-level class named `name`.
///
/// # Errors
///
/// Returns an error if the query cannot be compiled.
pub fn declares_class(parsed: &ParseResult, name: &str) -> Result<bool, SyntaxError> {
    let captures = TOP_LEVEL_CLASSES.captures(parsed)?;
    Ok(has_term(&captures, name))
}

/// Finds the first source file under `project` declaring a top-level class
/// named `name`.
///
/// Files are visited in the project's stable walk order. Files that cannot
/// be read are logged and skipped; nested classes never match.
///
/// # Errors
///
/// Returns an error if the parser cannot be initialised or the query cannot
/// be compiled.
pub fn find_class_file(
    project: &ProjectTree,
    name: &str,
) -> Result<Option<LocatedClass>, SyntaxError> {
    let mut parser = Parser::new(project.language())?;
    for path in project.source_files() {
        let parsed = match parser.parse_file(&path) {
            Ok(parsed) => parsed,
            Err(SyntaxError::Io { path: unreadable, source }) => {
                warn!(path = %unreadable.display(), error = %source, "skipping unreadable file");
                continue;
            }
            Err(other) => return Err(other),
        };
        if declares_class(&parsed, name)? {
            debug!(class = name, path = %path.display(), "class file located");
            return Ok(Some(LocatedClass {
                path,
                name: name.to_owned(),
                parsed,
            }));
        }
    }
    debug!(class = name, root = %project.root().display(), "class file not found");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(source: &str) -> ParseResult {
        Parser::java()
            .expect("parser init")
            .parse(source)
            .expect("parse")
    }

    fn superclass_of(source: &str) -> Option<String> {
        let parsed = parse(source);
        let class = class_declarations(parsed.root_node())
            .into_iter()
            .next()
            .expect("class declaration");
        superclass_name(class, parsed.source()).expect("query")
    }

    #[rstest]
    #[case("class Order extends BaseEntity {}", Some("BaseEntity"))]
    #[case("class Order extends Auditable<Long> {}", Some("Auditable"))]
    #[case("class Order extends Auditable<Map<String, Long>> {}", Some("Auditable"))]
    #[case("class Order extends com.example.BaseEntity {}", Some("BaseEntity"))]
    #[case("class Order extends com.example.common.BaseEntity<Long> {}", Some("BaseEntity"))]
    #[case("class Order implements Serializable {}", None)]
    #[case("class Order {}", None)]
    fn superclass_names(#[case] source: &str, #[case] expected: Option<&str>) {
        assert_eq!(superclass_of(source).as_deref(), expected);
    }

    #[rstest]
    #[case::outer_and_nested(
        "class Order extends Base { class Line extends Other {} }",
        Some("Base")
    )]
    #[case::nested_only("class Order { static class Line extends BaseEntity {} }", None)]
    #[case::local_only(
        "class Order { void build() { class Local extends BaseEntity {} } }",
        None
    )]
    fn nested_extends_clauses_are_ignored(#[case] source: &str, #[case] expected: Option<&str>) {
        assert_eq!(superclass_of(source).as_deref(), expected);
    }

    #[rstest]
    #[case("class Audit {}\nclass BaseEntity {}", true)]
    #[case("class Outer { class BaseEntity {} }", false)]
    #[case("interface BaseEntity {}", false)]
    fn declares_class_only_counts_top_level_classes(#[case] source: &str, #[case] expected: bool) {
        let parsed = parse(source);
        assert_eq!(declares_class(&parsed, "BaseEntity").expect("query"), expected);
    }
}
