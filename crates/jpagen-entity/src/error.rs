//! Error types for entity classification and code synthesis.

use std::path::PathBuf;

use jpagen_syntax::SyntaxError;
use thiserror::Error;

use crate::synth::FieldKind;

/// Reasons a buffer cannot be classified as a JPA entity.
///
/// The first five variants are expected user-facing outcomes; each ends the
/// classification pipeline at a distinct step.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClassificationError {
    /// No class declaration was found in the buffer.
    #[error("couldn't find a class declaration in {}", path.display())]
    ClassNameNotFound {
        /// Path of the analysed buffer.
        path: PathBuf,
    },

    /// The primary class carries no `@Entity` marker.
    #[error("class '{class_name}' is not annotated with @Entity")]
    NotAnEntity {
        /// Name of the analysed class.
        class_name: String,
    },

    /// The class has no `@Id` field and does not extend anything.
    #[error("no @Id field on '{class_name}' and no superclass to inherit one from")]
    NoIdentifierAndNoSuperclass {
        /// Name of the analysed class.
        class_name: String,
    },

    /// No source file under the project root declares the superclass.
    #[error("unable to locate superclass '{superclass}' under {}", root.display())]
    SuperclassFileNotFound {
        /// Simple name of the superclass.
        superclass: String,
        /// Project root that was scanned.
        root: PathBuf,
    },

    /// The superclass was found but declares no `@Id` field either.
    #[error("superclass '{superclass}' declares no @Id field")]
    SuperclassHasNoIdentifier {
        /// Simple name of the superclass.
        superclass: String,
    },

    /// An `@Id` marker exists but no field type could be read for it.
    ///
    /// Happens when the marked field has no type node, for example in a
    /// damaged buffer.
    #[error("class '{class_name}' has an @Id marker but no readable identifier type")]
    IdentifierTypeNotFound {
        /// Name of the class whose identifier could not be read.
        class_name: String,
    },

    /// The underlying parser or query engine failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ClassificationError {
    /// Returns a stable name for the error kind, used in diagnostics and
    /// tests.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ClassNameNotFound { .. } => "ClassNameNotFound",
            Self::NotAnEntity { .. } => "NotAnEntity",
            Self::NoIdentifierAndNoSuperclass { .. } => "NoIdentifierAndNoSuperclass",
            Self::SuperclassFileNotFound { .. } => "SuperclassFileNotFound",
            Self::SuperclassHasNoIdentifier { .. } => "SuperclassHasNoIdentifier",
            Self::IdentifierTypeNotFound { .. } => "IdentifierTypeNotFound",
            Self::Syntax(_) => "Syntax",
        }
    }

    /// Returns whether the error is an expected classification outcome
    /// rather than an internal failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Syntax(_))
    }
}

/// Reasons a field fragment cannot be generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SynthesisError {
    /// The requested type is not acceptable for the field kind.
    #[error("'{type_name}' is not a valid type for {kind} fields")]
    InvalidFieldType {
        /// Requested type name.
        type_name: String,
        /// Kind of field being generated.
        kind: FieldKind,
    },

    /// The requested field name is not a Java identifier.
    #[error("'{name}' is not a valid Java field name")]
    InvalidFieldName {
        /// Requested field name.
        name: String,
    },
}

impl SynthesisError {
    pub(crate) fn invalid_field_type(type_name: impl Into<String>, kind: FieldKind) -> Self {
        Self::InvalidFieldType {
            type_name: type_name.into(),
            kind,
        }
    }

    pub(crate) fn invalid_field_name(name: impl Into<String>) -> Self {
        Self::InvalidFieldName { name: name.into() }
    }
}
