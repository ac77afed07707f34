//! Annotation analyzers built on structural queries.
//!
//! Only marker annotations (no argument list) count as entity or identifier
//! markers, so `@Entity` matches but `@Entity(name = "orders")` does not.
//! Qualified markers such as `@jakarta.persistence.Id` are compared by their
//! last segment.
//!
//! When the scope is a class declaration only that class's own markers
//! count: annotations on nested types and on their fields are ignored.

use jpagen_syntax::{Capture, CaptureLabel, Node, QueryPattern, SyntaxError, has_term, texts};
use tracing::debug;

/// Marker that identifies an entity class.
pub const ENTITY_MARKER: &str = "Entity";

/// Marker that identifies the identifier field.
pub const IDENTIFIER_MARKER: &str = "Id";

static CLASS_MARKERS: QueryPattern = QueryPattern::new(
    r"(class_declaration
        (modifiers
          (marker_annotation
            name: [
              (identifier) @annotation_name
              (scoped_identifier name: (identifier) @annotation_name)
            ])))",
);

static FIELD_MARKERS: QueryPattern = QueryPattern::new(
    r"(field_declaration
        (modifiers
          (marker_annotation
            name: [
              (identifier) @annotation_name
              (scoped_identifier name: (identifier) @annotation_name)
            ])))",
);

static FIELD_ANNOTATIONS: QueryPattern = QueryPattern::new(
    r"(field_declaration
        (modifiers
          [
            (marker_annotation
              name: [
                (identifier) @annotation_name
                (scoped_identifier name: (identifier) @annotation_name)
              ])
            (annotation
              name: [
                (identifier) @annotation_name
                (scoped_identifier name: (identifier) @annotation_name)
              ])
          ]))",
);

/// Kinds that open a new type scope for annotations and fields.
const TYPE_SCOPES: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
    "object_creation_expression",
];

/// Returns whether `scope` carries `@Entity`.
///
/// For a class declaration this reads the class's own modifiers. Any other
/// scope matches the marker on any class within it.
///
/// # Errors
///
/// Returns an error if the query cannot be compiled.
pub fn is_entity(scope: Node<'_>, source: &str) -> Result<bool, SyntaxError> {
    let captures = owned_by(scope, CLASS_MARKERS.captures_in(scope, source)?);
    debug!(
        markers = ?texts(&captures, CaptureLabel::AnnotationName),
        "class marker annotations"
    );
    Ok(has_term(&captures, ENTITY_MARKER))
}

/// Returns whether a field of `scope` carries `@Id`.
///
/// For a class declaration only fields declared directly in its body count.
///
/// # Errors
///
/// Returns an error if the query cannot be compiled.
pub fn has_identifier_field(scope: Node<'_>, source: &str) -> Result<bool, SyntaxError> {
    let captures = owned_by(scope, FIELD_MARKERS.captures_in(scope, source)?);
    debug!(
        markers = ?texts(&captures, CaptureLabel::AnnotationName),
        "field marker annotations"
    );
    Ok(has_term(&captures, IDENTIFIER_MARKER))
}

/// Returns the simple names of every field annotation within `scope`, with
/// or without arguments, in document order.
///
/// # Errors
///
/// Returns an error if the query cannot be compiled.
pub fn field_annotations(scope: Node<'_>, source: &str) -> Result<Vec<String>, SyntaxError> {
    let captures = FIELD_ANNOTATIONS.captures_in(scope, source)?;
    Ok(texts(&captures, CaptureLabel::AnnotationName)
        .into_iter()
        .map(str::to_owned)
        .collect())
}

/// Keeps the captures whose nearest enclosing type is `scope`, when `scope`
/// is a class declaration.
fn owned_by<'tree>(scope: Node<'tree>, captures: Vec<Capture<'tree>>) -> Vec<Capture<'tree>> {
    if scope.kind() != "class_declaration" {
        return captures;
    }
    captures
        .into_iter()
        .filter(|capture| {
            enclosing_type(capture.node()).is_some_and(|owner| owner.id() == scope.id())
        })
        .collect()
}

fn enclosing_type(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node.parent();
    while let Some(candidate) = current {
        if TYPE_SCOPES.contains(&candidate.kind()) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}
