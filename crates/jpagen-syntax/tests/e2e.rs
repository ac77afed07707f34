//! End-to-end tests for jpagen-syntax.
//!
//! These tests drive the public API against files on disk, the way the
//! superclass resolver reads project sources.

use std::fs;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use jpagen_syntax::{CaptureLabel, Parser, QueryPattern, SupportedLanguage, first_text};

static CLASS_NAME: QueryPattern =
    QueryPattern::new("(program (class_declaration name: (identifier) @class_name))");

#[fixture]
fn project() -> TempDir {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let package = dir.path().join("src/main/java/com/example");
    fs::create_dir_all(&package).unwrap_or_else(|err| panic!("mkdir: {err}"));
    fs::write(
        package.join("BaseEntity.java"),
        "package com.example;\n\n@MappedSuperclass\npublic abstract class BaseEntity {\n    @Id\n    private UUID id;\n}\n",
    )
    .unwrap_or_else(|err| panic!("write: {err}"));
    dir
}

#[rstest]
fn parse_file_reads_from_disk(project: TempDir) {
    let path = project
        .path()
        .join("src/main/java/com/example/BaseEntity.java");
    let mut parser = Parser::java().unwrap_or_else(|err| panic!("parser init: {err}"));
    let parsed = parser
        .parse_file(&path)
        .unwrap_or_else(|err| panic!("parse: {err}"));

    assert!(!parsed.has_errors());
    assert_eq!(SupportedLanguage::from_path(&path), Some(parsed.language()));

    let captures = CLASS_NAME
        .captures(&parsed)
        .unwrap_or_else(|err| panic!("query: {err}"));
    assert_eq!(
        first_text(&captures, CaptureLabel::ClassName),
        Some("BaseEntity")
    );
}

#[rstest]
fn parse_file_error_names_the_path(project: TempDir) {
    let path = project.path().join("Missing.java");
    let mut parser = Parser::java().unwrap_or_else(|err| panic!("parser init: {err}"));
    let error = parser
        .parse_file(&path)
        .expect_err("missing file must be reported");

    assert!(error.to_string().contains("Missing.java"));
}

#[test]
fn top_level_class_query_ignores_nested_classes() {
    let mut parser = Parser::java().unwrap_or_else(|err| panic!("parser init: {err}"));
    let parsed = parser
        .parse("class Outer { static class Inner {} }")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    let captures = CLASS_NAME
        .captures(&parsed)
        .unwrap_or_else(|err| panic!("query: {err}"));

    assert_eq!(captures.len(), 1);
    assert_eq!(captures.first().map(|c| c.text()), Some("Outer"));
}
