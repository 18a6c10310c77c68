//! Named methods a host binds event handlers to.
//!
//! The registry starts with the four document verbs under their template
//! names (`$add`, `$append`, `$setField`, `$remove`), taking positional
//! arguments in the same order as the [`Model`] methods. Hosts add their own
//! behavior by registering plain Rust closures; there is no code evaluation.

use std::{collections::HashMap, fmt, sync::Arc};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    model::Model,
    mutation::Outcome,
    parser::ParseError,
    scope::Bindings,
    value::Value,
};

pub type Method = Arc<dyn Fn(&mut Model, &[Value]) -> Result<Value, MethodError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MethodError {
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    #[error("{method}: missing argument '{name}' at position {position}")]
    MissingArgument {
        method: String,
        name: &'static str,
        position: usize,
    },

    #[error("{method}: argument '{name}' must be {expected}, got {found}")]
    InvalidArgument {
        method: String,
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Raised by host-registered methods
    #[error("{method}: {message}")]
    Failed { method: String, message: String },
}

pub const ADD: &str = "$add";
pub const APPEND: &str = "$append";
pub const SET_FIELD: &str = "$setField";
pub const REMOVE: &str = "$remove";

/// Name to host function mapping.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use slotpath::{MethodRegistry, Model, Value};
///
/// let registry = MethodRegistry::default();
/// let mut model = Model::new(Value::from(json!({"list": [1, 2]})));
///
/// registry
///     .call(&mut model, "$append", &[Value::from("list"), Value::Integer(3)])
///     .unwrap();
/// assert_eq!(serde_json::Value::from(model.data()), json!({"list": [1, 2, 3]}));
/// ```
#[derive(Clone)]
pub struct MethodRegistry {
    methods: HashMap<String, Method>,
}

impl Default for MethodRegistry {
    fn default() -> Self {
        let mut registry = MethodRegistry::empty();
        registry.insert(ADD, |model, args| {
            let path = path_arg(ADD, args)?;
            let value = value_arg(ADD, args, 1, "value")?;
            let bindings = bindings_arg(ADD, args, 2)?;
            Ok(outcome_value(model.add(path, value, &bindings)?))
        });
        registry.insert(APPEND, |model, args| {
            let path = path_arg(APPEND, args)?;
            let value = value_arg(APPEND, args, 1, "value")?;
            let bindings = bindings_arg(APPEND, args, 2)?;
            Ok(outcome_value(model.append(path, value, &bindings)?))
        });
        registry.insert(SET_FIELD, |model, args| {
            let path = path_arg(SET_FIELD, args)?;
            let value = value_arg(SET_FIELD, args, 1, "value")?;
            let bindings = bindings_arg(SET_FIELD, args, 2)?;
            Ok(outcome_value(model.set_field(path, value, &bindings)?))
        });
        registry.insert(REMOVE, |model, args| {
            let path = path_arg(REMOVE, args)?;
            let bindings = bindings_arg(REMOVE, args, 1)?;
            Ok(outcome_value(model.remove(path, &bindings)?))
        });
        registry
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.methods.keys().collect();
        names.sort();
        f.debug_struct("MethodRegistry").field("methods", &names).finish()
    }
}

impl MethodRegistry {
    /// A registry without the default verbs.
    pub fn empty() -> Self {
        MethodRegistry {
            methods: HashMap::new(),
        }
    }

    fn insert<F>(&mut self, name: &str, method: F)
    where
        F: Fn(&mut Model, &[Value]) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        self.methods.insert(name.to_string(), Arc::new(method));
    }

    /// Register a host method, replacing any method of the same name.
    ///
    /// Returns the replaced method, if any.
    pub fn register<F>(&mut self, name: impl Into<String>, method: F) -> Option<Method>
    where
        F: Fn(&mut Model, &[Value]) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        let name = name.into();
        let previous = self.methods.insert(name.clone(), Arc::new(method));
        if previous.is_some() {
            info!(method = %name, "replacing registered method");
        } else {
            debug!(method = %name, "registered method");
        }
        previous
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn call(&self, model: &mut Model, name: &str, args: &[Value]) -> Result<Value, MethodError> {
        let method = self
            .methods
            .get(name)
            .ok_or_else(|| MethodError::UnknownMethod(name.to_string()))?;
        method(model, args)
    }
}

/// Verbs report whether the document changed.
fn outcome_value(outcome: Outcome) -> Value {
    Value::Boolean(outcome.is_applied())
}

fn path_arg<'a>(method: &str, args: &'a [Value]) -> Result<&'a str, MethodError> {
    match args.first() {
        Some(Value::String(path)) => Ok(path),
        Some(other) => Err(MethodError::InvalidArgument {
            method: method.to_string(),
            name: "path",
            expected: "a string",
            found: other.type_name(),
        }),
        None => Err(MethodError::MissingArgument {
            method: method.to_string(),
            name: "path",
            position: 0,
        }),
    }
}

fn value_arg(method: &str, args: &[Value], position: usize, name: &'static str) -> Result<Value, MethodError> {
    args.get(position)
        .cloned()
        .ok_or_else(|| MethodError::MissingArgument {
            method: method.to_string(),
            name,
            position,
        })
}

/// Bindings are optional; `null` means none.
fn bindings_arg(method: &str, args: &[Value], position: usize) -> Result<Bindings, MethodError> {
    match args.get(position) {
        None | Some(Value::Null) => Ok(Bindings::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(MethodError::InvalidArgument {
            method: method.to_string(),
            name: "bindings",
            expected: "an object",
            found: other.type_name(),
        }),
    }
}
