//! Apply one of the four verbs to a JSON document

use std::fmt;

use super::{CliError, parse_bindings, parse_document};
use crate::{Model, Outcome, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Verb {
    Add,
    Append,
    SetField,
    Remove,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::Add => "add",
            Verb::Append => "append",
            Verb::SetField => "set-field",
            Verb::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// Options for the mutate command
#[derive(Debug, Clone)]
pub struct MutateOptions {
    pub verb: Verb,
    pub path: String,
    /// JSON text of the value; ignored by `remove`
    pub value: Option<String>,
    /// JSON input string
    pub input: Option<String>,
    /// `name=JSON` variable bindings
    pub bindings: Vec<String>,
}

#[derive(Debug)]
pub struct MutateResult {
    pub outcome: Outcome,
    pub document: serde_json::Value,
}

pub fn execute_mutate(options: &MutateOptions) -> Result<MutateResult, CliError> {
    let bindings = parse_bindings(&options.bindings)?;
    let value = match (options.verb, &options.value) {
        (Verb::Remove, _) => Value::Null,
        (_, Some(json)) => Value::from(serde_json::from_str::<serde_json::Value>(json)?),
        (verb, None) => return Err(CliError::MissingValue(verb)),
    };
    let document = parse_document(options.input.as_deref())?;

    let mut model = Model::new(document);
    let path = options.path.as_str();
    let outcome = match options.verb {
        Verb::Add => model.add(path, value, &bindings)?,
        Verb::Append => model.append(path, value, &bindings)?,
        Verb::SetField => model.set_field(path, value, &bindings)?,
        Verb::Remove => model.remove(path, &bindings)?,
    };

    Ok(MutateResult {
        outcome,
        document: model.into_data().into(),
    })
}
