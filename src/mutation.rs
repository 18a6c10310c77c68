//! The four document edits: add, append, set_field and remove.
//!
//! Each verb resolves its path, decides what to do while the document is
//! borrowed immutably, then re-enters the document mutably through the keys
//! the resolver recorded. A structural problem never aborts the caller: the
//! document is left untouched, an `error` event is emitted and the verb
//! returns [`Outcome::Rejected`].

use thiserror::Error;
use tracing::{debug, error, trace};

use crate::{
    cache::CompiledPath,
    resolver::lookup_mut,
    scope::Scope,
    value::Value,
};

/// A mutation attempted against a container of the wrong shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuralError {
    #[error("can't add field {key} to list at '{path}'")]
    AddToList { path: String, key: String },

    #[error("can't add field {key} to undefined value at '{path}'")]
    AddToUndefined { path: String, key: String },

    #[error("can only append to a list, '{path}' is {found}")]
    AppendToNonList { path: String, found: &'static str },

    #[error("{key} is not a valid index for list of length {len} at '{path}'")]
    InvalidIndex { path: String, key: String, len: usize },

    #[error("{key} can't be used as a field name at '{path}'")]
    InvalidKey { path: String, key: String },

    #[error("can't set field {key} on {found} at '{path}'")]
    NotAContainer {
        path: String,
        key: String,
        found: &'static str,
    },
}

impl StructuralError {
    pub fn kind(&self) -> &'static str {
        match self {
            StructuralError::AddToList { .. } => "add_to_list",
            StructuralError::AddToUndefined { .. } => "add_to_undefined",
            StructuralError::AppendToNonList { .. } => "append_to_non_list",
            StructuralError::InvalidIndex { .. } => "invalid_index",
            StructuralError::InvalidKey { .. } => "invalid_key",
            StructuralError::NotAContainer { .. } => "not_a_container",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            StructuralError::AddToList { path, .. }
            | StructuralError::AddToUndefined { path, .. }
            | StructuralError::AppendToNonList { path, .. }
            | StructuralError::InvalidIndex { path, .. }
            | StructuralError::InvalidKey { path, .. }
            | StructuralError::NotAContainer { path, .. } => path,
        }
    }
}

/// What a verb did to the document.
///
/// `Created` and `Overwritten` are kept apart so a caller that tracks
/// changes can tell a new field from an updated one.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created { key: Value },
    Overwritten { key: Value },
    Appended { index: usize },
    Removed { key: Value },
    /// Nothing to do; no diagnostic was emitted.
    Ignored,
    /// The document was left unchanged.
    Rejected(StructuralError),
}

impl Outcome {
    /// True when the document changed.
    pub fn is_applied(&self) -> bool {
        !matches!(self, Outcome::Ignored | Outcome::Rejected(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    pub fn error(&self) -> Option<&StructuralError> {
        match self {
            Outcome::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

/// Most null slots `set_field` will insert before a write past the end of a list.
pub const MAX_PADDING: usize = 1024;

fn reject(err: StructuralError) -> Outcome {
    error!(kind = err.kind(), path = err.path(), "{}", err);
    Outcome::Rejected(err)
}

fn describe(key: Option<&Value>) -> String {
    match key {
        Some(key) => serde_json::Value::from(key).to_string(),
        None => "undefined".to_string(),
    }
}

fn insert_field(map: &mut std::collections::HashMap<String, Value>, field: String, value: Value) -> Outcome {
    let key = Value::String(field.clone());
    match map.insert(field, value) {
        None => Outcome::Created { key },
        Some(_) => Outcome::Overwritten { key },
    }
}

/// Assign `value` at the addressed field of a mapping.
///
/// Rejected when the container is a list, is missing or null, or is a scalar.
pub fn add(document: &mut Value, path: &CompiledPath, value: Value, scope: &Scope) -> Outcome {
    let res = path.resolve(scope, document);
    let parent = if res.ok { res.parent } else { None };
    let key = res.last_key.clone();
    let source = path.source();

    let field = match parent {
        Some(Value::Array(_)) => {
            return reject(StructuralError::AddToList {
                path: source.to_string(),
                key: describe(key.as_ref()),
            });
        }
        None | Some(Value::Null) => {
            return reject(StructuralError::AddToUndefined {
                path: source.to_string(),
                key: describe(key.as_ref()),
            });
        }
        Some(Value::Object(_)) => match key.as_ref().and_then(Value::as_field) {
            Some(field) => field,
            None => {
                return reject(StructuralError::InvalidKey {
                    path: source.to_string(),
                    key: describe(key.as_ref()),
                });
            }
        },
        Some(other) => {
            return reject(StructuralError::NotAContainer {
                path: source.to_string(),
                key: describe(key.as_ref()),
                found: other.type_name(),
            });
        }
    };
    let parent_keys = res.parent_keys().to_vec();

    match lookup_mut(document, &parent_keys) {
        Some(Value::Object(map)) => insert_field(map, field, value),
        _ => Outcome::Ignored,
    }
}

/// Push `value` onto the end of the addressed list.
///
/// Unlike the other verbs this targets the node itself, not its parent.
pub fn append(document: &mut Value, path: &CompiledPath, value: Value, scope: &Scope) -> Outcome {
    let res = path.resolve(scope, document);
    let node = if res.ok { res.node } else { None };

    if !matches!(node, Some(Value::Array(_))) {
        return reject(StructuralError::AppendToNonList {
            path: path.source().to_string(),
            found: node.map_or("undefined", Value::type_name),
        });
    }
    let keys = res.resolved_keys.clone();

    match lookup_mut(document, &keys) {
        Some(Value::Array(items)) => {
            items.push(value);
            Outcome::Appended {
                index: items.len() - 1,
            }
        }
        _ => Outcome::Ignored,
    }
}

/// Assign `value` at the addressed key, in a mapping or a list.
///
/// A falsy or missing container is silently ignored; `add` reports the same
/// situation as an error. Writing past the end of a list pads it with nulls,
/// up to [`MAX_PADDING`] of them; a larger gap is rejected as an invalid index.
pub fn set_field(document: &mut Value, path: &CompiledPath, value: Value, scope: &Scope) -> Outcome {
    let res = path.resolve(scope, document);
    let parent = if res.ok { res.parent } else { None };
    let Some(parent) = parent.filter(|p| p.is_truthy()) else {
        trace!(path = path.source(), "set_field target container is absent");
        return Outcome::Ignored;
    };
    let key = res.last_key.clone();
    let source = path.source();

    match parent {
        Value::Object(_) if key.as_ref().and_then(Value::as_field).is_none() => {
            return reject(StructuralError::InvalidKey {
                path: source.to_string(),
                key: describe(key.as_ref()),
            });
        }
        Value::Array(items)
            if key
                .as_ref()
                .and_then(Value::as_index)
                .is_none_or(|index| index.saturating_sub(items.len()) > MAX_PADDING) =>
        {
            return reject(StructuralError::InvalidIndex {
                path: source.to_string(),
                key: describe(key.as_ref()),
                len: items.len(),
            });
        }
        Value::Object(_) | Value::Array(_) => {}
        other => {
            return reject(StructuralError::NotAContainer {
                path: source.to_string(),
                key: describe(key.as_ref()),
                found: other.type_name(),
            });
        }
    }
    let parent_keys = res.parent_keys().to_vec();
    let Some(key) = key else {
        return Outcome::Ignored;
    };

    match lookup_mut(document, &parent_keys) {
        Some(Value::Object(map)) => match key.as_field() {
            Some(field) => insert_field(map, field, value),
            None => Outcome::Ignored,
        },
        Some(Value::Array(items)) => match key.as_index() {
            Some(index) if index < items.len() => {
                items[index] = value;
                Outcome::Overwritten { key }
            }
            Some(index) => {
                items.resize(index, Value::Null);
                items.push(value);
                Outcome::Created { key }
            }
            None => Outcome::Ignored,
        },
        _ => Outcome::Ignored,
    }
}

/// List position for `remove`: any finite number, truncated toward zero,
/// negative values counting back from the end and clamped at the start.
fn removal_index(key: &Value, len: usize) -> Option<usize> {
    let n = match key {
        Value::Integer(n) => *n,
        Value::Float(f) if f.is_finite() => f.trunc() as i64,
        _ => return None,
    };
    if n >= 0 {
        Some(usize::try_from(n).unwrap_or(usize::MAX))
    } else {
        let back = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
        Some(len.saturating_sub(back))
    }
}

/// Delete the addressed list element or mapping field.
///
/// List elements after the removed one shift left. A non-numeric key on a
/// list is rejected; a missing container or field is ignored.
pub fn remove(document: &mut Value, path: &CompiledPath, scope: &Scope) -> Outcome {
    let res = path.resolve(scope, document);
    let parent = if res.ok { res.parent } else { None };
    let key = res.last_key.clone();

    match (parent, key.as_ref()) {
        (Some(Value::Array(items)), Some(k)) if removal_index(k, items.len()).is_some() => {}
        (Some(Value::Array(items)), _) => {
            return reject(StructuralError::InvalidIndex {
                path: path.source().to_string(),
                key: describe(key.as_ref()),
                len: items.len(),
            });
        }
        (Some(Value::Object(_)), Some(_)) => {}
        (other, _) => {
            let found = other.map_or("undefined", Value::type_name);
            debug!(path = path.source(), found, "nothing to remove");
            return Outcome::Ignored;
        }
    }
    let parent_keys = res.parent_keys().to_vec();
    let Some(key) = key else {
        return Outcome::Ignored;
    };

    let outcome = match lookup_mut(document, &parent_keys) {
        Some(Value::Array(items)) => match removal_index(&key, items.len()) {
            Some(index) if index < items.len() => {
                items.remove(index);
                Outcome::Removed { key }
            }
            _ => Outcome::Ignored,
        },
        Some(Value::Object(map)) => match key.as_field() {
            Some(field) if map.remove(&field).is_some() => Outcome::Removed { key },
            _ => Outcome::Ignored,
        },
        _ => Outcome::Ignored,
    };
    if !outcome.is_applied() {
        debug!(path = path.source(), "nothing to remove");
    }
    outcome
}
