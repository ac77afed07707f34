//! CLI argument definitions for `jpagen`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jpagen_entity::synth::{EnumEncoding, GenerationStrategy};

/// Generates Spring Data repositories and JPA entity fields.
#[derive(Parser, Debug)]
#[command(name = "jpagen", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Raises the log level to `debug`.
    #[arg(long, global = true)]
    pub(crate) debug: bool,
    /// The generator to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Generators exposed by the CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Creates `<Entity>Repository.java` next to an entity source file.
    Repository(RepositoryArgs),
    /// Adds an `@Id` field to a class.
    IdField(IdFieldArgs),
    /// Adds a basic column field to a class.
    BasicField(BasicFieldArgs),
    /// Adds an `@Enumerated` field to a class.
    EnumField(EnumFieldArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RepositoryArgs {
    /// Entity source file to analyse.
    #[arg(value_name = "ENTITY_FILE")]
    pub(crate) entity: PathBuf,
    /// Writes the repository to stdout instead of creating a file.
    #[arg(long)]
    pub(crate) print: bool,
}

/// Options shared by every field generator.
#[derive(Args, Debug, Clone)]
pub(crate) struct FieldTarget {
    /// Java source file whose primary class receives the field.
    #[arg(value_name = "FILE")]
    pub(crate) file: PathBuf,
    /// Declared type of the field.
    #[arg(long = "type", value_name = "TYPE")]
    pub(crate) field_type: String,
    /// Name of the field.
    #[arg(long = "name", value_name = "NAME")]
    pub(crate) field_name: String,
    /// Allows null values in the column.
    #[arg(long)]
    pub(crate) nullable: bool,
    /// Writes the fragment to stdout instead of editing the file.
    #[arg(long)]
    pub(crate) print: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct IdFieldArgs {
    #[command(flatten)]
    pub(crate) target: FieldTarget,
    /// Identifier generation strategy: none, auto, identity, sequence or uuid.
    #[arg(long, default_value_t = GenerationStrategy::Assigned)]
    pub(crate) generation: GenerationStrategy,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct BasicFieldArgs {
    #[command(flatten)]
    pub(crate) target: FieldTarget,
    /// Adds a unique constraint to the column.
    #[arg(long)]
    pub(crate) unique: bool,
    /// Marks the column as a large object.
    #[arg(long)]
    pub(crate) large_object: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct EnumFieldArgs {
    #[command(flatten)]
    pub(crate) target: FieldTarget,
    /// Persistence encoding: ordinal or string.
    #[arg(long, default_value_t = EnumEncoding::String)]
    pub(crate) encoding: EnumEncoding,
    /// Column length for string-encoded enums.
    #[arg(long)]
    pub(crate) length: Option<u32>,
    /// Adds a unique constraint to the column.
    #[arg(long)]
    pub(crate) unique: bool,
}
