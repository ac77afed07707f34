//! Catalog of well-known Java types and the packages that declare them.
//!
//! The catalog decides whether a type used in generated code needs an
//! import. Lookups are exact and case-sensitive. A name may be declared by
//! more than one package (`Date`, `Geometry`); in that case the entry
//! declared first wins. Names missing from the catalog are project-local
//! and never produce an import.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// A single catalog row: a type name and its declaring package.
///
/// Primitive types carry no package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Simple type name as written in source, including any `[]` suffix.
    pub name: &'static str,
    /// Declaring package, or `None` for primitives.
    pub namespace: Option<&'static str>,
}

const fn library(name: &'static str, namespace: &'static str) -> CatalogEntry {
    CatalogEntry {
        name,
        namespace: Some(namespace),
    }
}

const fn primitive(name: &'static str) -> CatalogEntry {
    CatalogEntry {
        name,
        namespace: None,
    }
}

/// The Java types the generators know about, in declaration order.
pub const JAVA_TYPES: &[CatalogEntry] = &[
    library("String", "java.lang"),
    library("Long", "java.lang"),
    library("Integer", "java.lang"),
    library("Boolean", "java.lang"),
    library("Double", "java.lang"),
    library("BigDecimal", "java.math"),
    library("Instant", "java.time"),
    library("LocalDateTime", "java.time"),
    library("LocalDate", "java.time"),
    library("LocalTime", "java.time"),
    library("OffsetDateTime", "java.time"),
    library("OffsetTime", "java.time"),
    library("Date", "java.util"),
    library("Date", "java.sql"),
    library("Time", "java.sql"),
    library("Timestamp", "java.sql"),
    library("TimeZone", "java.util"),
    library("Byte[]", "java.lang"),
    library("Blob", "java.sql"),
    library("Byte", "java.lang"),
    library("Character", "java.lang"),
    library("Short", "java.lang"),
    library("Float", "java.lang"),
    library("BigInteger", "java.math"),
    library("URL", "java.net"),
    library("Duration", "java.time"),
    library("ZonedDateTime", "java.time"),
    library("Calendar", "java.util"),
    library("Locale", "java.util"),
    library("Currency", "java.util"),
    library("Class", "java.lang"),
    library("UUID", "java.util"),
    library("Character[]", "java.lang"),
    library("Clob", "java.sql"),
    library("NClob", "java.sql"),
    primitive("boolean"),
    primitive("byte"),
    primitive("float"),
    primitive("char"),
    primitive("int"),
    primitive("double"),
    primitive("short"),
    primitive("long"),
    primitive("byte[]"),
    primitive("char[]"),
    library("Geometry", "org.geolatte.geom"),
    library("Geometry", "com.vividsolutions.jts.geom"),
    library("InetAddress", "java.net"),
    library("ZoneOffset", "java.time"),
];

static JAVA_CATALOG: Lazy<TypeCatalog> = Lazy::new(|| TypeCatalog::from_entries(JAVA_TYPES));

/// Where a type name comes from, as far as the catalog can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOrigin {
    /// A language primitive; never imported.
    Primitive,
    /// A library type declared in `namespace` (the first-declared package
    /// when the name is ambiguous).
    Library {
        /// Declaring package.
        namespace: &'static str,
    },
    /// Not in the catalog; assumed to resolve within the project.
    ProjectLocal,
}

/// Multi-map from type name to declaring packages.
#[derive(Debug)]
pub struct TypeCatalog {
    entries: &'static [CatalogEntry],
    by_name: HashMap<&'static str, Vec<Option<&'static str>>>,
}

impl TypeCatalog {
    /// Returns the shared catalog of Java types.
    #[must_use]
    pub fn java() -> &'static Self {
        &JAVA_CATALOG
    }

    /// Builds a catalog, keeping the declaration order of repeated names.
    #[must_use]
    pub fn from_entries(entries: &'static [CatalogEntry]) -> Self {
        let mut by_name: HashMap<&'static str, Vec<Option<&'static str>>> = HashMap::new();
        for entry in entries {
            by_name.entry(entry.name).or_default().push(entry.namespace);
        }
        Self { entries, by_name }
    }

    /// Returns every catalog row in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    /// Returns the packages declaring `name`, in declaration order.
    ///
    /// The list is empty for primitives and for names outside the catalog;
    /// use [`contains`](Self::contains) to tell the two apart.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Vec<&'static str> {
        self.by_name
            .get(name)
            .map(|namespaces| namespaces.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Returns whether `name` appears in the catalog at all.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Classifies `name` as primitive, library or project-local.
    #[must_use]
    pub fn origin(&self, name: &str) -> TypeOrigin {
        let Some(namespaces) = self.by_name.get(name) else {
            return TypeOrigin::ProjectLocal;
        };
        namespaces
            .iter()
            .flatten()
            .next()
            .map_or(TypeOrigin::Primitive, |namespace| TypeOrigin::Library {
                namespace,
            })
    }

    /// Returns the fully qualified import for `name`, if one is needed.
    ///
    /// Array suffixes are dropped so `Byte[]` imports `java.lang.Byte`.
    #[must_use]
    pub fn import_path(&self, name: &str) -> Option<String> {
        match self.origin(name) {
            TypeOrigin::Library { namespace } => {
                let element = name.trim_end_matches("[]");
                Some(format!("{namespace}.{element}"))
            }
            TypeOrigin::Primitive | TypeOrigin::ProjectLocal => None,
        }
    }
}

/// Returns the wrapper class for a primitive type name.
///
/// Generic type arguments cannot be primitives, so generators box them
/// before use.
#[must_use]
pub fn boxed_primitive(name: &str) -> Option<&'static str> {
    match name {
        "boolean" => Some("Boolean"),
        "byte" => Some("Byte"),
        "char" => Some("Character"),
        "short" => Some("Short"),
        "int" => Some("Integer"),
        "long" => Some("Long"),
        "float" => Some("Float"),
        "double" => Some("Double"),
        _ => None,
    }
}
