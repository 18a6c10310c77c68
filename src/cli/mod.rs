//! CLI support for slotpath
//!
//! Provides programmatic access to the `slotpath` subcommands so they can be
//! driven without spawning the binary.

mod convert;
mod mutate;
mod parse;
mod resolve;

pub use convert::{parse_bindings, parse_document};
pub use mutate::{MutateOptions, MutateResult, Verb, execute_mutate};
pub use parse::{ParsedLine, parse_lines};
pub use resolve::{ResolveOptions, execute_resolve};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Invalid binding '{0}': expected name=JSON")]
    Binding(String),

    #[error("'{0}' needs a value argument")]
    MissingValue(Verb),

    #[error("Rejected: {0}")]
    Rejected(#[from] crate::StructuralError),
}
