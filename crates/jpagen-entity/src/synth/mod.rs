//! Source generators for repositories and entity fields.
//!
//! Generators are pure: they return text and leave writing it to the
//! caller.

mod field;
mod repository;

pub use field::{
    BasicFieldParams, EnumEncoding, EnumFieldParams, FieldKind, FieldSpec, GenerationStrategy,
    IDENTIFIER_TYPES, IdFieldParams, column_name, synthesize_field, synthesize_field_with,
};
pub use repository::{
    REPOSITORY_BASE, repository_file_name, repository_name, synthesize_repository,
    synthesize_repository_for,
};
