//! Resolve a path against a JSON document

use super::{CliError, parse_bindings, parse_document};
use crate::Model;

/// Options for the resolve command
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// The path expression
    pub path: String,
    /// JSON input string
    pub input: Option<String>,
    /// `name=JSON` variable bindings
    pub bindings: Vec<String>,
}

/// Resolve and describe the result as JSON.
pub fn execute_resolve(options: &ResolveOptions) -> Result<serde_json::Value, CliError> {
    let bindings = parse_bindings(&options.bindings)?;
    let document = parse_document(options.input.as_deref())?;

    let mut model = Model::new(document);
    let resolution = model.lookup(&options.path, &bindings)?;
    Ok(resolution.to_json())
}
