//! JSON text to document and binding conversion

use super::CliError;
use crate::{Bindings, Value};

/// Parse a JSON document, failing with [`CliError::NoInput`] when absent.
pub fn parse_document(input: Option<&str>) -> Result<Value, CliError> {
    let json_str = input.ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;
    Ok(Value::from(json_value))
}

/// Parse `name=JSON` pairs into bindings. Later pairs win.
pub fn parse_bindings(pairs: &[String]) -> Result<Bindings, CliError> {
    let mut bindings = Bindings::new();
    for pair in pairs {
        let (name, json) = pair
            .split_once('=')
            .filter(|(name, _)| !name.is_empty())
            .ok_or_else(|| CliError::Binding(pair.clone()))?;
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|_| CliError::Binding(pair.clone()))?;
        bindings.insert(name.to_string(), Value::from(value));
    }
    Ok(bindings)
}
