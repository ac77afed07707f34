//! Entity field generation.
//!
//! Each generator renders a complete field declaration, annotations first,
//! indented for direct insertion into a class body. Column names are the
//! `snake_case` form of the field name.

use strum::{Display, EnumString};

use crate::catalog::TypeCatalog;
use crate::error::SynthesisError;
use crate::package::is_java_identifier;

const INDENT: &str = "    ";

/// Types an `@Id` field may be declared with.
pub const IDENTIFIER_TYPES: [&str; 4] = ["Long", "Integer", "String", "UUID"];

/// The kinds of field the generators produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FieldKind {
    /// An `@Id` field.
    Identifier,
    /// A plain column.
    Basic,
    /// An enum-valued column.
    Enumerated,
}

/// Identifier generation strategy, mirroring `GenerationType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GenerationStrategy {
    /// Identifiers are assigned by the application; no generator is
    /// emitted.
    #[default]
    #[strum(to_string = "none", serialize = "assigned")]
    Assigned,
    /// `GenerationType.AUTO`.
    Auto,
    /// `GenerationType.IDENTITY`.
    Identity,
    /// `GenerationType.SEQUENCE`.
    Sequence,
    /// `GenerationType.UUID`.
    Uuid,
}

impl GenerationStrategy {
    /// Returns the `GenerationType` constant, or `None` when no
    /// `@GeneratedValue` should be emitted.
    #[must_use]
    pub const fn generation_type(self) -> Option<&'static str> {
        match self {
            Self::Assigned => None,
            Self::Auto => Some("AUTO"),
            Self::Identity => Some("IDENTITY"),
            Self::Sequence => Some("SEQUENCE"),
            Self::Uuid => Some("UUID"),
        }
    }
}

/// How an enum column is persisted, mirroring `EnumType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnumEncoding {
    /// Stored as the constant's ordinal.
    Ordinal,
    /// Stored as the constant's name.
    #[default]
    String,
}

impl EnumEncoding {
    /// Returns the `EnumType` constant.
    #[must_use]
    pub const fn enum_type(self) -> &'static str {
        match self {
            Self::Ordinal => "ORDINAL",
            Self::String => "STRING",
        }
    }
}

/// Parameters for an identifier field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdFieldParams {
    /// Declared type; one of [`IDENTIFIER_TYPES`].
    pub field_type: String,
    /// Field name.
    pub field_name: String,
    /// Value generation strategy.
    pub generation: GenerationStrategy,
    /// Whether the column accepts nulls.
    pub nullable: bool,
}

/// Parameters for a basic field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicFieldParams {
    /// Declared type; must be in the type catalog.
    pub field_type: String,
    /// Field name.
    pub field_name: String,
    /// Whether the column accepts nulls.
    pub nullable: bool,
    /// Whether the column carries a unique constraint.
    pub unique: bool,
    /// Whether the column is a large object (`@Lob`).
    pub large_object: bool,
}

/// Parameters for an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumFieldParams {
    /// Enum type; any Java identifier, since enums are project-local.
    pub field_type: String,
    /// Field name.
    pub field_name: String,
    /// Persistence encoding.
    pub encoding: EnumEncoding,
    /// Column length, only emitted for [`EnumEncoding::String`].
    pub length: Option<u32>,
    /// Whether the column accepts nulls.
    pub nullable: bool,
    /// Whether the column carries a unique constraint.
    pub unique: bool,
}

/// A field to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// An `@Id` field.
    Identifier(IdFieldParams),
    /// A plain column.
    Basic(BasicFieldParams),
    /// An enum-valued column.
    Enumerated(EnumFieldParams),
}

impl FieldSpec {
    /// Returns the kind of field.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Identifier(_) => FieldKind::Identifier,
            Self::Basic(_) => FieldKind::Basic,
            Self::Enumerated(_) => FieldKind::Enumerated,
        }
    }

    /// Returns the declared field type.
    #[must_use]
    pub fn field_type(&self) -> &str {
        match self {
            Self::Identifier(params) => &params.field_type,
            Self::Basic(params) => &params.field_type,
            Self::Enumerated(params) => &params.field_type,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn field_name(&self) -> &str {
        match self {
            Self::Identifier(params) => &params.field_name,
            Self::Basic(params) => &params.field_name,
            Self::Enumerated(params) => &params.field_name,
        }
    }

    /// Returns the simple annotation names the rendered field carries, in
    /// order.
    #[must_use]
    pub fn annotation_names(&self) -> Vec<&'static str> {
        match self {
            Self::Identifier(params) => {
                let mut names = vec!["Id"];
                if params.generation.generation_type().is_some() {
                    names.push("GeneratedValue");
                }
                names.push("Column");
                names
            }
            Self::Basic(params) if params.large_object => vec!["Lob", "Column"],
            Self::Basic(_) => vec!["Column"],
            Self::Enumerated(_) => vec!["Enumerated", "Column"],
        }
    }
}

/// Renders a field declaration using the shared Java type catalog.
///
/// # Errors
///
/// Returns [`SynthesisError::InvalidFieldName`] when the name is not a Java
/// identifier, and [`SynthesisError::InvalidFieldType`] when an identifier
/// field uses a type outside [`IDENTIFIER_TYPES`], a basic field uses a type
/// outside the catalog, or an enumerated field uses a type that is not a
/// Java identifier.
pub fn synthesize_field(spec: &FieldSpec) -> Result<String, SynthesisError> {
    synthesize_field_with(TypeCatalog::java(), spec)
}

/// Renders a field declaration, validating types against `catalog`.
///
/// # Errors
///
/// See [`synthesize_field`].
pub fn synthesize_field_with(
    catalog: &TypeCatalog,
    spec: &FieldSpec,
) -> Result<String, SynthesisError> {
    let field_name = spec.field_name();
    if !is_java_identifier(field_name) {
        return Err(SynthesisError::invalid_field_name(field_name));
    }
    let field_type = spec.field_type();
    let type_ok = match spec.kind() {
        FieldKind::Identifier => {
            IDENTIFIER_TYPES.contains(&field_type) && catalog.contains(field_type)
        }
        FieldKind::Basic => catalog.contains(field_type),
        FieldKind::Enumerated => is_java_identifier(field_type),
    };
    if !type_ok {
        return Err(SynthesisError::invalid_field_type(field_type, spec.kind()));
    }

    let mut annotations = Vec::new();
    match spec {
        FieldSpec::Identifier(params) => {
            annotations.push("@Id".to_owned());
            if let Some(generation_type) = params.generation.generation_type() {
                annotations.push(format!(
                    "@GeneratedValue(strategy = GenerationType.{generation_type})"
                ));
            }
            annotations.push(column_annotation(field_name, params.nullable, false, None));
        }
        FieldSpec::Basic(params) => {
            if params.large_object {
                annotations.push("@Lob".to_owned());
            }
            annotations.push(column_annotation(
                field_name,
                params.nullable,
                params.unique,
                None,
            ));
        }
        FieldSpec::Enumerated(params) => {
            annotations.push(format!(
                "@Enumerated(EnumType.{})",
                params.encoding.enum_type()
            ));
            let length = match params.encoding {
                EnumEncoding::String => params.length,
                EnumEncoding::Ordinal => None,
            };
            annotations.push(column_annotation(
                field_name,
                params.nullable,
                params.unique,
                length,
            ));
        }
    }

    let mut out = String::new();
    for annotation in &annotations {
        out.push_str(INDENT);
        out.push_str(annotation);
        out.push('\n');
    }
    out.push_str(&format!("{INDENT}private {field_type} {field_name};\n"));
    Ok(out)
}

fn column_annotation(field_name: &str, nullable: bool, unique: bool, length: Option<u32>) -> String {
    let mut arguments = vec![format!("name = \"{}\"", column_name(field_name))];
    if !nullable {
        arguments.push("nullable = false".to_owned());
    }
    if unique {
        arguments.push("unique = true".to_owned());
    }
    if let Some(length) = length {
        arguments.push(format!("length = {length}"));
    }
    format!("@Column({})", arguments.join(", "))
}

/// Converts a camel-case field name into a `snake_case` column name.
///
/// Runs of capitals are treated as one word, so `orderURL` becomes
/// `order_url` and `URLValue` becomes `url_value`.
#[must_use]
pub fn column_name(field_name: &str) -> String {
    let chars: Vec<char> = field_name.chars().collect();
    let mut out = String::with_capacity(field_name.len().saturating_add(4));
    for (position, ch) in chars.iter().enumerate() {
        let previous = position.checked_sub(1).and_then(|index| chars.get(index));
        let next = chars.get(position.saturating_add(1));
        if ch.is_uppercase() {
            let after_lower = previous.is_some_and(|prev| prev.is_lowercase() || prev.is_ascii_digit());
            let ends_acronym = previous.is_some_and(|prev| prev.is_uppercase())
                && next.is_some_and(|following| following.is_lowercase());
            if after_lower || ends_acronym {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(*ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn identifier(field_type: &str, generation: GenerationStrategy) -> FieldSpec {
        FieldSpec::Identifier(IdFieldParams {
            field_type: field_type.to_owned(),
            field_name: "id".to_owned(),
            generation,
            nullable: false,
        })
    }

    fn basic(field_type: &str, field_name: &str) -> BasicFieldParams {
        BasicFieldParams {
            field_type: field_type.to_owned(),
            field_name: field_name.to_owned(),
            nullable: true,
            unique: false,
            large_object: false,
        }
    }

    fn enumerated(encoding: EnumEncoding, length: Option<u32>) -> FieldSpec {
        FieldSpec::Enumerated(EnumFieldParams {
            field_type: "OrderStatus".to_owned(),
            field_name: "status".to_owned(),
            encoding,
            length,
            nullable: true,
            unique: false,
        })
    }

    #[test]
    fn identifier_field_with_generated_value() {
        let rendered = synthesize_field(&identifier("Long", GenerationStrategy::Identity))
            .expect("synthesis");

        assert_eq!(
            rendered,
            concat!(
                "    @Id\n",
                "    @GeneratedValue(strategy = GenerationType.IDENTITY)\n",
                "    @Column(name = \"id\", nullable = false)\n",
                "    private Long id;\n",
            )
        );
    }

    #[test]
    fn assigned_identifiers_skip_the_generator() {
        let rendered = synthesize_field(&identifier("UUID", GenerationStrategy::Assigned))
            .expect("synthesis");

        assert!(!rendered.contains("@GeneratedValue"));
        assert!(rendered.ends_with("    private UUID id;\n"));
    }

    #[test]
    fn basic_field_with_constraints() {
        let spec = FieldSpec::Basic(BasicFieldParams {
            nullable: false,
            unique: true,
            ..basic("String", "emailAddress")
        });
        let rendered = synthesize_field(&spec).expect("synthesis");

        assert_eq!(
            rendered,
            concat!(
                "    @Column(name = \"email_address\", nullable = false, unique = true)\n",
                "    private String emailAddress;\n",
            )
        );
    }

    #[test]
    fn large_object_fields_are_marked() {
        let spec = FieldSpec::Basic(BasicFieldParams {
            large_object: true,
            ..basic("byte[]", "payload")
        });
        let rendered = synthesize_field(&spec).expect("synthesis");

        assert!(rendered.starts_with("    @Lob\n    @Column(name = \"payload\")\n"));
    }

    #[rstest]
    #[case(EnumEncoding::String, Some(32), "@Column(name = \"status\", length = 32)")]
    #[case(EnumEncoding::String, None, "@Column(name = \"status\")")]
    #[case(EnumEncoding::Ordinal, Some(32), "@Column(name = \"status\")")]
    fn enum_column_length_depends_on_encoding(
        #[case] encoding: EnumEncoding,
        #[case] length: Option<u32>,
        #[case] expected_column: &str,
    ) {
        let rendered = synthesize_field(&enumerated(encoding, length)).expect("synthesis");

        assert!(rendered.contains(&format!("@Enumerated(EnumType.{})", encoding.enum_type())));
        assert!(rendered.contains(expected_column));
        assert!(rendered.ends_with("private OrderStatus status;\n"));
    }

    #[rstest]
    #[case(FieldSpec::Basic(basic("Money", "total")), FieldKind::Basic)]
    #[case(identifier("string", GenerationStrategy::Auto), FieldKind::Identifier)]
    fn types_outside_the_catalog_are_rejected(#[case] spec: FieldSpec, #[case] kind: FieldKind) {
        let error = synthesize_field(&spec).expect_err("type must be rejected");

        assert_eq!(
            error,
            SynthesisError::InvalidFieldType {
                type_name: spec.field_type().to_owned(),
                kind,
            }
        );
    }

    #[rstest]
    #[case("Blob")]
    #[case("byte[]")]
    #[case("Geometry")]
    #[case("LocalDate")]
    #[case("long")]
    fn identifiers_are_limited_to_key_types(#[case] field_type: &str) {
        assert!(TypeCatalog::java().contains(field_type));
        assert!(synthesize_field(&FieldSpec::Basic(basic(field_type, "value"))).is_ok());

        assert_eq!(
            synthesize_field(&identifier(field_type, GenerationStrategy::Auto)),
            Err(SynthesisError::InvalidFieldType {
                type_name: field_type.to_owned(),
                kind: FieldKind::Identifier,
            })
        );
    }

    #[rstest]
    #[case("Long")]
    #[case("Integer")]
    #[case("String")]
    #[case("UUID")]
    fn key_types_are_accepted_for_identifiers(#[case] field_type: &str) {
        let rendered = synthesize_field(&identifier(field_type, GenerationStrategy::Assigned))
            .expect("synthesis");

        assert!(rendered.ends_with(&format!("    private {field_type} id;\n")));
    }

    #[test]
    fn enumerated_types_must_be_identifiers() {
        let spec = FieldSpec::Enumerated(EnumFieldParams {
            field_type: "Order-Status".to_owned(),
            field_name: "status".to_owned(),
            encoding: EnumEncoding::String,
            length: None,
            nullable: true,
            unique: false,
        });

        assert!(matches!(
            synthesize_field(&spec),
            Err(SynthesisError::InvalidFieldType { kind: FieldKind::Enumerated, .. })
        ));
    }

    #[rstest]
    #[case("first-name")]
    #[case("2nd")]
    #[case("class")]
    #[case("")]
    fn invalid_field_names_are_rejected(#[case] name: &str) {
        let spec = FieldSpec::Basic(basic("String", name));

        assert_eq!(
            synthesize_field(&spec),
            Err(SynthesisError::InvalidFieldName {
                name: name.to_owned()
            })
        );
    }

    #[rstest]
    #[case("id", "id")]
    #[case("createdAt", "created_at")]
    #[case("orderURL", "order_url")]
    #[case("URLValue", "url_value")]
    #[case("line2Total", "line2_total")]
    #[case("already_snake", "already_snake")]
    fn column_names_are_snake_case(#[case] field_name: &str, #[case] expected: &str) {
        assert_eq!(column_name(field_name), expected);
    }

    #[rstest]
    #[case("none", GenerationStrategy::Assigned)]
    #[case("IDENTITY", GenerationStrategy::Identity)]
    #[case("uuid", GenerationStrategy::Uuid)]
    fn strategies_parse_from_cli_values(#[case] value: &str, #[case] expected: GenerationStrategy) {
        assert_eq!(value.parse::<GenerationStrategy>().ok(), Some(expected));
    }
}
