//! Identifier-type resolution.
//!
//! Resolution runs in two phases. First the outermost class declarations
//! under a scope are collected depth-first without descending into a class
//! once it is found. Then each class body is scanned for a direct field
//! declaration marked `@Id` and the declared type of that field is read.
//! Fields of nested classes never count.

use jpagen_syntax::{Node, node_text};
use tracing::debug;

use crate::annotations::IDENTIFIER_MARKER;

const CLASS_DECLARATION: &str = "class_declaration";
const FIELD_DECLARATION: &str = "field_declaration";
const MODIFIERS: &str = "modifiers";
const MARKER_ANNOTATION: &str = "marker_annotation";
const SCOPED_IDENTIFIER: &str = "scoped_identifier";

/// Returns the outermost class declarations under `scope`, in document
/// order.
///
/// When `scope` is itself a class declaration the result is just `scope`.
#[must_use]
pub fn class_declarations(scope: Node<'_>) -> Vec<Node<'_>> {
    let mut found = Vec::new();
    collect_classes(scope, &mut found);
    found
}

fn collect_classes<'tree>(node: Node<'tree>, found: &mut Vec<Node<'tree>>) {
    if node.kind() == CLASS_DECLARATION {
        found.push(node);
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_classes(child, found);
    }
}

/// Returns the simple name of a class declaration.
#[must_use]
pub fn class_name<'s>(class: Node<'_>, source: &'s str) -> Option<&'s str> {
    class
        .child_by_field_name("name")
        .map(|name| node_text(name, source))
}

/// Returns the declared type of the first `@Id` field directly inside
/// `class`.
///
/// Primitive, generic and array types are returned exactly as written.
#[must_use]
pub fn identifier_field_type<'s>(class: Node<'_>, source: &'s str) -> Option<&'s str> {
    let body = class.child_by_field_name("body")?;
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter(|member| member.kind() == FIELD_DECLARATION)
        .find(|field| is_identifier_field(*field, source))
        .and_then(|field| field.child_by_field_name("type"))
        .map(|field_type| node_text(field_type, source))
}

/// Resolves the identifier type for the outermost classes under `scope`.
///
/// The first marked field across those classes wins.
#[must_use]
pub fn find_identifier_type(scope: Node<'_>, source: &str) -> Option<String> {
    let found = class_declarations(scope)
        .into_iter()
        .find_map(|class| identifier_field_type(class, source))
        .map(str::to_owned);
    debug!(identifier_type = ?found, "identifier type resolution");
    found
}

fn is_identifier_field(field: Node<'_>, source: &str) -> bool {
    let mut cursor = field.walk();
    let Some(modifiers) = field
        .named_children(&mut cursor)
        .find(|child| child.kind() == MODIFIERS)
    else {
        return false;
    };
    let mut modifier_cursor = modifiers.walk();
    modifiers
        .named_children(&mut modifier_cursor)
        .filter(|modifier| modifier.kind() == MARKER_ANNOTATION)
        .filter_map(|marker| marker.child_by_field_name("name"))
        .any(|name| simple_name(name, source) == IDENTIFIER_MARKER)
}

fn simple_name<'s>(name: Node<'_>, source: &'s str) -> &'s str {
    if name.kind() == SCOPED_IDENTIFIER {
        if let Some(last) = name.child_by_field_name("name") {
            return node_text(last, source);
        }
    }
    node_text(name, source)
}
