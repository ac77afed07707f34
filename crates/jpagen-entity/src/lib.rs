//! JPA entity analysis and source generation for `jpagen`.
//!
//! Builds on the structural queries of `jpagen_syntax` to answer three
//! questions about a Java buffer: is its primary class an `@Entity`, does it
//! declare an `@Id` field, and what is that field's type. When the entity
//! inherits its identifier, the direct superclass is located by scanning the
//! project tree.
//!
//! The resulting [`EntityFacts`] drive the generators in [`synth`], which
//! render a Spring Data repository interface or new entity fields. Field
//! fragments are placed into an existing class with [`plan_field_insertion`].
//!
//! ```no_run
//! use std::path::Path;
//!
//! use jpagen_entity::{ProjectTree, classify_entity, synth};
//! use jpagen_syntax::Parser;
//!
//! let path = Path::new("src/main/java/com/example/Order.java");
//! let parsed = Parser::java()?.parse_file(path)?;
//! let facts = classify_entity(&ProjectTree::new("."), &parsed, path)?;
//! println!("{}", synth::synthesize_repository_for(&facts));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod annotations;
pub mod catalog;
mod classify;
mod error;
mod identifier;
mod insert;
mod package;
mod project;
mod superclass;
pub mod synth;

pub use annotations::{
    ENTITY_MARKER, IDENTIFIER_MARKER, field_annotations, has_identifier_field, is_entity,
};
pub use catalog::{TypeCatalog, TypeOrigin};
pub use classify::{EntityFacts, IdentifierOrigin, classify_entity};
pub use error::{ClassificationError, SynthesisError};
pub use identifier::{class_declarations, class_name, find_identifier_type, identifier_field_type};
pub use insert::{Insertion, plan_field_insertion};
pub use package::{
    declared_package, is_java_identifier, package_from_path, primary_class, resolve_package,
};
pub use project::ProjectTree;
pub use superclass::{LocatedClass, declares_class, find_class_file, superclass_name};

#[cfg(test)]
mod tests;
