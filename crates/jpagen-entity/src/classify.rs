//! The entity classification pipeline.
//!
//! Classification decides whether a buffer holds a JPA entity and, if so,
//! which type its identifier has. The identifier is either declared on the
//! entity itself or inherited from its direct superclass, which is looked up
//! by simple name among the project's source files. Only one level of
//! inheritance is followed.

use std::path::{Path, PathBuf};

use jpagen_syntax::ParseResult;
use tracing::{debug, info};

use crate::annotations::{has_identifier_field, is_entity};
use crate::error::ClassificationError;
use crate::identifier::{class_name, find_identifier_type};
use crate::package::{primary_class, resolve_package};
use crate::project::ProjectTree;
use crate::superclass::{find_class_file, superclass_name};

/// Where an entity's identifier field is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierOrigin {
    /// Declared directly on the entity.
    Declared,
    /// Inherited from the direct superclass.
    Inherited {
        /// Simple name of the superclass.
        superclass: String,
        /// File that declares the superclass.
        path: PathBuf,
    },
}

/// Everything the generators need to know about a classified entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityFacts {
    class_name: String,
    package_path: Option<String>,
    identifier_type: String,
    origin: IdentifierOrigin,
}

impl EntityFacts {
    /// Assembles facts from their parts.
    #[must_use]
    pub fn new(
        class_name: impl Into<String>,
        package_path: Option<String>,
        identifier_type: impl Into<String>,
        origin: IdentifierOrigin,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            package_path,
            identifier_type: identifier_type.into(),
            origin,
        }
    }

    /// Returns the entity's simple class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the entity's package, or `None` for the default package.
    #[must_use]
    pub fn package_path(&self) -> Option<&str> {
        self.package_path.as_deref()
    }

    /// Returns the identifier type exactly as written in source.
    #[must_use]
    pub fn identifier_type(&self) -> &str {
        &self.identifier_type
    }

    /// Returns where the identifier is declared.
    #[must_use]
    pub const fn origin(&self) -> &IdentifierOrigin {
        &self.origin
    }

    /// Returns whether the entity declares its own identifier field.
    #[must_use]
    pub const fn has_identifier_field(&self) -> bool {
        matches!(self.origin, IdentifierOrigin::Declared)
    }

    /// Returns the superclass the identifier was inherited from.
    #[must_use]
    pub fn superclass(&self) -> Option<&str> {
        match &self.origin {
            IdentifierOrigin::Declared => None,
            IdentifierOrigin::Inherited { superclass, .. } => Some(superclass.as_str()),
        }
    }
}

/// Classifies the buffer at `buffer_path` within `project`.
///
/// The buffer is taken from `buffer` rather than disk so unsaved edits are
/// honoured. The superclass, when needed, is read from disk.
///
/// # Errors
///
/// Returns the first [`ClassificationError`] met along the pipeline: a
/// missing class, a class without `@Entity`, a missing identifier with no
/// superclass, an unlocatable superclass, or a superclass without an
/// identifier.
pub fn classify_entity(
    project: &ProjectTree,
    buffer: &ParseResult,
    buffer_path: &Path,
) -> Result<EntityFacts, ClassificationError> {
    let source = buffer.source();
    let class = primary_class(buffer).ok_or_else(|| ClassificationError::ClassNameNotFound {
        path: buffer_path.to_path_buf(),
    })?;
    let entity_name = class_name(class, source)
        .ok_or_else(|| ClassificationError::ClassNameNotFound {
            path: buffer_path.to_path_buf(),
        })?
        .to_owned();
    let package_path = resolve_package(buffer, buffer_path)?;
    debug!(class = %entity_name, package = ?package_path, "classifying buffer");

    if !is_entity(class, source)? {
        return Err(ClassificationError::NotAnEntity {
            class_name: entity_name,
        });
    }

    if has_identifier_field(class, source)? {
        let identifier_type = find_identifier_type(class, source).ok_or_else(|| {
            ClassificationError::IdentifierTypeNotFound {
                class_name: entity_name.clone(),
            }
        })?;
        info!(class = %entity_name, %identifier_type, "identifier declared on entity");
        return Ok(EntityFacts::new(
            entity_name,
            package_path,
            identifier_type,
            IdentifierOrigin::Declared,
        ));
    }

    let Some(superclass) = superclass_name(class, source)? else {
        return Err(ClassificationError::NoIdentifierAndNoSuperclass {
            class_name: entity_name,
        });
    };
    let Some(located) = find_class_file(project, &superclass)? else {
        return Err(ClassificationError::SuperclassFileNotFound {
            superclass,
            root: project.root().to_path_buf(),
        });
    };

    let scope = located.class_node();
    let super_source = located.parsed().source();
    if !has_identifier_field(scope, super_source)? {
        return Err(ClassificationError::SuperclassHasNoIdentifier { superclass });
    }
    let identifier_type = find_identifier_type(scope, super_source).ok_or_else(|| {
        ClassificationError::IdentifierTypeNotFound {
            class_name: superclass.clone(),
        }
    })?;
    info!(
        class = %entity_name,
        %superclass,
        %identifier_type,
        "identifier inherited from superclass"
    );
    Ok(EntityFacts::new(
        entity_name,
        package_path,
        identifier_type,
        IdentifierOrigin::Inherited {
            superclass,
            path: located.path().to_path_buf(),
        },
    ))
}
