use crate::{
    cache::PathCache,
    mutation::{self, Outcome},
    parser::ParseError,
    resolver::Resolution,
    scope::{Bindings, Scope},
    value::Value,
};

/// A document together with the path cache used to address it.
///
/// This is the receiver of the four verbs. Every call builds a fresh
/// [`Scope`] from its bindings; nothing survives between calls except the
/// compiled paths.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use slotpath::{Bindings, Model, Value};
///
/// let mut model = Model::new(Value::from(json!({"todos": []})));
/// model.append("todos", Value::from("write docs"), &Bindings::new()).unwrap();
///
/// assert_eq!(
///     serde_json::Value::from(model.into_data()),
///     json!({"todos": ["write docs"]})
/// );
/// ```
#[derive(Debug, Default)]
pub struct Model {
    data: Value,
    paths: PathCache,
}

impl Model {
    pub fn new(data: Value) -> Self {
        Self::with_cache(data, PathCache::new())
    }

    pub fn with_cache(data: Value, paths: PathCache) -> Self {
        Model { data, paths }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Value {
        &mut self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    pub fn cache(&self) -> &PathCache {
        &self.paths
    }

    /// Hand the cache back, e.g. to reuse it for another document.
    pub fn into_parts(self) -> (Value, PathCache) {
        (self.data, self.paths)
    }

    /// Resolve `path` without changing anything.
    pub fn lookup(&mut self, path: &str, bindings: &Bindings) -> Result<Resolution<'_>, ParseError> {
        let compiled = self.paths.compile(path)?;
        let scope = Scope::from(bindings.clone());
        Ok(compiled.resolve(&scope, &self.data))
    }

    /// The addressed node, `None` if it does not exist.
    pub fn get(&mut self, path: &str, bindings: &Bindings) -> Result<Option<&Value>, ParseError> {
        Ok(self.lookup(path, bindings)?.node)
    }

    pub fn add(&mut self, path: &str, value: Value, bindings: &Bindings) -> Result<Outcome, ParseError> {
        let compiled = self.paths.compile(path)?;
        let scope = Scope::from(bindings.clone());
        Ok(mutation::add(&mut self.data, &compiled, value, &scope))
    }

    pub fn append(&mut self, path: &str, value: Value, bindings: &Bindings) -> Result<Outcome, ParseError> {
        let compiled = self.paths.compile(path)?;
        let scope = Scope::from(bindings.clone());
        Ok(mutation::append(&mut self.data, &compiled, value, &scope))
    }

    pub fn set_field(&mut self, path: &str, value: Value, bindings: &Bindings) -> Result<Outcome, ParseError> {
        let compiled = self.paths.compile(path)?;
        let scope = Scope::from(bindings.clone());
        Ok(mutation::set_field(&mut self.data, &compiled, value, &scope))
    }

    pub fn remove(&mut self, path: &str, bindings: &Bindings) -> Result<Outcome, ParseError> {
        let compiled = self.paths.compile(path)?;
        let scope = Scope::from(bindings.clone());
        Ok(mutation::remove(&mut self.data, &compiled, &scope))
    }
}
