//! Package and primary-class resolution for a source buffer.
//!
//! A declared `package` statement always wins. Without one, the package is
//! derived from the directories below the nearest `java` source root, so
//! `src/main/java/com/example/Order.java` resolves to `com.example`. A
//! buffer outside any source root lives in the default package.

use std::path::{Component, Path};

use jpagen_syntax::{CaptureLabel, Node, ParseResult, QueryPattern, SyntaxError, first_text};
use tracing::debug;

use crate::identifier::class_declarations;

const SOURCE_ROOT: &str = "java";

static PACKAGE: QueryPattern = QueryPattern::new(
    "(package_declaration [(identifier) (scoped_identifier)] @package_name)",
);

/// Returns the primary class of a buffer: its first top-level class
/// declaration.
#[must_use]
pub fn primary_class(parsed: &ParseResult) -> Option<Node<'_>> {
    class_declarations(parsed.root_node()).into_iter().next()
}

/// Returns the name declared by the buffer's `package` statement.
///
/// # Errors
///
/// Returns an error if the query cannot be compiled.
pub fn declared_package(parsed: &ParseResult) -> Result<Option<String>, SyntaxError> {
    let captures = PACKAGE.captures(parsed)?;
    Ok(first_text(&captures, CaptureLabel::PackageName).map(str::to_owned))
}

/// Derives a package name from the directories under the nearest `java`
/// source root.
///
/// Returns `None` when the path has no such root, when the file sits
/// directly in it, or when a directory name is not a Java identifier.
#[must_use]
pub fn package_from_path(path: &Path) -> Option<String> {
    let directories: Vec<&str> = path
        .parent()?
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .collect();
    let root = directories.iter().rposition(|name| *name == SOURCE_ROOT)?;
    let segments = directories.get(root.saturating_add(1)..)?;
    if segments.is_empty() || !segments.iter().all(|segment| is_java_identifier(segment)) {
        return None;
    }
    Some(segments.join("."))
}

/// Resolves the package of a buffer, preferring its declaration.
///
/// # Errors
///
/// Returns an error if the query cannot be compiled.
pub fn resolve_package(parsed: &ParseResult, path: &Path) -> Result<Option<String>, SyntaxError> {
    let declared = declared_package(parsed)?;
    let resolved = declared.or_else(|| package_from_path(path));
    debug!(package = ?resolved, path = %path.display(), "package resolution");
    Ok(resolved)
}

/// Returns whether `name` is a legal Java identifier.
///
/// Reserved words and the literals `true`, `false` and `null` are rejected.
#[must_use]
pub fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let starts = first.is_alphabetic() || first == '_' || first == '$';
    starts
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
        && name != "_"
        && !JAVA_RESERVED.contains(&name)
}

const JAVA_RESERVED: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];
