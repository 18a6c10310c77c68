use std::collections::HashMap;

use crate::value::Value;

/// Variable name to value, as supplied by the caller of a verb.
pub type Bindings = HashMap<String, Value>;

/// One frame of variable bindings with an optional enclosing frame.
///
/// Lookups walk from the innermost frame outward. A frame owns its parent, so
/// a chain is always a straight line and can never loop.
///
/// # Examples
///
/// ```
/// use slotpath::{Scope, Value};
///
/// let mut outer = Scope::new();
/// outer.set("i", Value::Integer(1));
///
/// let mut inner = Scope::with_parent(outer);
/// inner.set("j", Value::Integer(2));
///
/// assert_eq!(inner.get("i"), Some(&Value::Integer(1)));
/// assert_eq!(inner.get_or("k", &Value::Null), &Value::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    bindings: Bindings,
    parent: Option<Box<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Scope) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: Some(Box::new(parent)),
        }
    }

    /// A frame over `bindings`, nested inside `parent`.
    pub fn with_bindings(bindings: Bindings, parent: Option<Scope>) -> Self {
        Self {
            bindings,
            parent: parent.map(Box::new),
        }
    }

    /// Look `name` up in this frame, then in each enclosing frame.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.get(name)))
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.get(name).unwrap_or(default)
    }

    /// Bind `name` in this frame only; enclosing frames are never touched.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.parent.as_deref()
    }

    pub fn into_parent(self) -> Option<Scope> {
        self.parent.map(|b| *b)
    }

    /// Number of frames in the chain, this one included.
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }
}

impl From<Bindings> for Scope {
    fn from(bindings: Bindings) -> Self {
        Self::with_bindings(bindings, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_frame_shadows_outer() {
        let mut outer = Scope::new();
        outer.set("x", Value::Integer(1));
        let mut inner = Scope::with_parent(outer);
        inner.set("x", Value::Integer(2));

        assert_eq!(inner.get("x"), Some(&Value::Integer(2)));
        assert_eq!(inner.depth(), 2);

        let outer = inner.into_parent().unwrap();
        assert_eq!(outer.get("x"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_set_never_reaches_parent() {
        let mut outer = Scope::new();
        outer.set("x", Value::Integer(1));
        let mut inner = Scope::with_parent(outer);
        inner.set("x", Value::Integer(5));

        assert_eq!(inner.parent().unwrap().get("x"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_null_binding_is_a_value() {
        let mut bindings = Bindings::new();
        bindings.insert("x".to_string(), Value::Null);
        let scope = Scope::with_bindings(bindings, None);

        assert!(scope.contains("x"));
        assert_eq!(scope.get_or("x", &Value::Integer(7)), &Value::Null);
    }

    #[test]
    fn test_missing_name_falls_back_to_default() {
        let scope = Scope::from(Bindings::new());
        assert_eq!(scope.get_or("x", &Value::Integer(7)), &Value::Integer(7));
        assert!(!scope.contains("x"));
    }
}
