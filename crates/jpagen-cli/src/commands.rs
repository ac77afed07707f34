//! Subcommand execution.
//!
//! Each command reads the target file from disk, runs the analysis and
//! generators from `jpagen_entity`, validates the generated text with the
//! parser, and hands it to a sink.

use std::io::Write;
use std::path::{Path, PathBuf};

use jpagen_entity::synth::{
    BasicFieldParams, EnumFieldParams, FieldSpec, IdFieldParams, repository_file_name,
    synthesize_field, synthesize_repository_for,
};
use jpagen_entity::{ProjectTree, classify_entity, plan_field_insertion};
use jpagen_syntax::Parser;
use tracing::{debug, info};

use crate::cli::{
    BasicFieldArgs, CliCommand, EnumFieldArgs, FieldTarget, IdFieldArgs, RepositoryArgs,
};
use crate::diagnostics::{Diagnostics, Severity};
use crate::output::{create_new_file, emit, ensure_parses, rewrite_file};
use crate::{AppError, IoStreams};

/// Runs `command` against the project rooted at `project_root`.
pub(crate) fn execute<W: Write, E: Write>(
    command: CliCommand,
    project_root: &Path,
    io: &mut IoStreams<'_, W, E>,
) -> Result<(), AppError> {
    match command {
        CliCommand::Repository(args) => repository(&args, project_root, io),
        CliCommand::IdField(IdFieldArgs { target, generation }) => {
            let spec = FieldSpec::Identifier(IdFieldParams {
                field_type: target.field_type.clone(),
                field_name: target.field_name.clone(),
                generation,
                nullable: target.nullable,
            });
            field(&target, &spec, io)
        }
        CliCommand::BasicField(BasicFieldArgs {
            target,
            unique,
            large_object,
        }) => {
            let spec = FieldSpec::Basic(BasicFieldParams {
                field_type: target.field_type.clone(),
                field_name: target.field_name.clone(),
                nullable: target.nullable,
                unique,
                large_object,
            });
            field(&target, &spec, io)
        }
        CliCommand::EnumField(EnumFieldArgs {
            target,
            encoding,
            length,
            unique,
        }) => {
            let spec = FieldSpec::Enumerated(EnumFieldParams {
                field_type: target.field_type.clone(),
                field_name: target.field_name.clone(),
                encoding,
                length,
                nullable: target.nullable,
                unique,
            });
            field(&target, &spec, io)
        }
    }
}

fn repository<W: Write, E: Write>(
    args: &RepositoryArgs,
    project_root: &Path,
    io: &mut IoStreams<'_, W, E>,
) -> Result<(), AppError> {
    let mut parser = Parser::java()?;
    let parsed = parser.parse_file(&args.entity)?;
    let facts = classify_entity(&ProjectTree::new(project_root), &parsed, &args.entity)?;

    let rendered = synthesize_repository_for(&facts);
    debug!(target: "jpagen::generated", text = %rendered, "synthesized repository");
    ensure_parses(&parser.parse(&rendered)?, "repository")?;

    if args.print {
        return emit(io.stdout, &rendered);
    }

    let target = args
        .entity
        .with_file_name(repository_file_name(facts.class_name()));
    create_new_file(&target, &rendered)?;
    Diagnostics::new(io.stderr).report(
        &format!("created {}", target.display()),
        "RepositoryCreated",
        Severity::Info,
        false,
    );
    emit(io.stdout, &format!("{}\n", target.display()))
}

fn field<W: Write, E: Write>(
    target: &FieldTarget,
    spec: &FieldSpec,
    io: &mut IoStreams<'_, W, E>,
) -> Result<(), AppError> {
    let mut parser = Parser::java()?;
    let fragment = synthesize_field(spec)?;
    debug!(
        target: "jpagen::generated",
        text = %fragment,
        kind = %spec.kind(),
        "synthesized field"
    );
    ensure_parses(&parser.parse_class_member(&fragment)?, "field")?;

    if target.print {
        return emit(io.stdout, &fragment);
    }

    let parsed = parser.parse_file(&target.file)?;
    if parsed.has_errors() {
        Diagnostics::new(io.stderr).report(
            &format!(
                "{} already has syntax errors; inserting anyway",
                target.file.display()
            ),
            "ExistingSyntaxErrors",
            Severity::Warning,
            true,
        );
    }

    let updated = plan_field_insertion(&parsed, &fragment)
        .and_then(|insertion| insertion.apply(parsed.source()))
        .ok_or_else(|| insertion_point_not_found(&target.file))?;
    rewrite_file(&target.file, &updated)?;
    info!(
        path = %target.file.display(),
        field = spec.field_name(),
        "inserted field"
    );
    Ok(())
}

fn insertion_point_not_found(path: &Path) -> AppError {
    AppError::InsertionPointNotFound {
        path: PathBuf::from(path),
    }
}
