//! Spring Data repository generation.

use crate::catalog::{TypeCatalog, boxed_primitive};
use crate::classify::EntityFacts;

/// Fully qualified name of the repository base interface.
pub const REPOSITORY_BASE: &str = "org.springframework.data.jpa.repository.JpaRepository";

/// Returns the repository interface name for an entity class.
#[must_use]
pub fn repository_name(class_name: &str) -> String {
    format!("{class_name}Repository")
}

/// Returns the file name the repository interface is written to.
#[must_use]
pub fn repository_file_name(class_name: &str) -> String {
    format!("{}.java", repository_name(class_name))
}

/// Renders a repository interface for an entity.
///
/// Primitive identifier types are boxed, since type arguments must be
/// reference types. An import is emitted for the identifier type when the
/// catalog knows its package; the package line is omitted for the default
/// package.
#[must_use]
pub fn synthesize_repository(
    class_name: &str,
    package_path: Option<&str>,
    identifier_type: &str,
) -> String {
    let type_argument = boxed_primitive(identifier_type).unwrap_or(identifier_type);

    let mut out = String::new();
    if let Some(package) = package_path {
        out.push_str(&format!("package {package};\n\n"));
    }
    out.push_str(&format!("import {REPOSITORY_BASE};\n\n"));
    if let Some(import) = TypeCatalog::java().import_path(type_argument) {
        out.push_str(&format!("import {import};\n\n"));
    }
    out.push_str(&format!(
        "public interface {} extends JpaRepository<{class_name}, {type_argument}> {{}}\n",
        repository_name(class_name)
    ));
    out
}

/// Renders the repository interface for classified entity facts.
#[must_use]
pub fn synthesize_repository_for(facts: &EntityFacts) -> String {
    synthesize_repository(
        facts.class_name(),
        facts.package_path(),
        facts.identifier_type(),
    )
}
