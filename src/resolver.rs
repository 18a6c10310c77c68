//! Walks a [`Path`] over a document.
//!
//! Resolution keeps track of the container of the final step and the key
//! used to enter it, because every mutation happens one level above the
//! node that a plain lookup would return. The result records the keys
//! actually used, so a mutation can re-enter the document mutably with
//! [`lookup_mut`] instead of holding references across the walk.

use std::sync::Arc;

use tracing::trace;

use crate::{
    ast::{Path, Segment},
    scope::Scope,
    value::Value,
};

/// Outcome of walking a path over a document.
///
/// `ok` is false when the walk had to step out of a missing node before the
/// path ended. In that case `node` is `None` and `parent`/`last_key` describe
/// the last step that succeeded; they are not a valid mutation target.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub ok: bool,
    /// The addressed node, `None` when it does not exist.
    pub node: Option<&'a Value>,
    /// The container the final step looked into.
    pub parent: Option<&'a Value>,
    /// The key of the final step, after variables and nested paths were resolved.
    pub last_key: Option<Value>,
    pub path: Arc<Path>,
    /// Every effective key, in walk order.
    pub resolved_keys: Vec<Value>,
}

impl Resolution<'_> {
    /// Keys leading from the root to `parent`.
    pub fn parent_keys(&self) -> &[Value] {
        let len = self.resolved_keys.len().saturating_sub(1);
        &self.resolved_keys[..len]
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        out.insert("ok".into(), self.ok.into());
        if let Some(node) = self.node {
            out.insert("node".into(), node.into());
        }
        if let Some(parent) = self.parent {
            out.insert("parent".into(), parent.into());
        }
        if let Some(key) = &self.last_key {
            out.insert("lastKey".into(), key.into());
        }
        out.insert("path".into(), self.path.to_json());
        out.insert(
            "resolvedKeys".into(),
            self.resolved_keys.iter().map(serde_json::Value::from).collect(),
        );
        serde_json::Value::Object(out)
    }
}

struct Walk<'a> {
    ok: bool,
    node: Option<&'a Value>,
    parent: Option<&'a Value>,
    last_key: Option<Value>,
    resolved_keys: Vec<Value>,
}

/// Resolve `path` against `document`, looking variables up in `scope`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use serde_json::json;
/// use slotpath::{parse, resolve, Scope, Value};
///
/// let doc = Value::from(json!({"a": {"b": [10, 20]}}));
/// let path = Arc::new(parse("a.b[0]").unwrap());
/// let res = resolve(&path, &Scope::new(), &doc);
///
/// assert!(res.ok);
/// assert_eq!(res.node, Some(&Value::Integer(10)));
/// assert_eq!(res.last_key, Some(Value::Integer(0)));
/// ```
pub fn resolve<'a>(path: &Arc<Path>, scope: &Scope, document: &'a Value) -> Resolution<'a> {
    let walk = walk(path, scope, document);
    Resolution {
        ok: walk.ok,
        node: walk.node,
        parent: walk.parent,
        last_key: walk.last_key,
        path: Arc::clone(path),
        resolved_keys: walk.resolved_keys,
    }
}

fn walk<'a>(path: &Path, scope: &Scope, root: &'a Value) -> Walk<'a> {
    let mut node = Some(root);
    let mut parent = Some(root);
    let mut last_key = None;
    let mut ok = true;
    let mut resolved_keys = Vec::with_capacity(path.len());

    for segment in path {
        let Some(current) = node else {
            ok = false;
            break;
        };
        parent = Some(current);

        let key = effective_key(segment, scope, root);
        node = step(current, &key);
        trace!(?segment, ?key, found = node.is_some(), "path step");

        resolved_keys.push(key.clone());
        last_key = Some(key);
    }

    Walk {
        ok,
        node,
        parent,
        last_key,
        resolved_keys,
    }
}

/// Missing variables and unresolvable nested paths become `Null`, which
/// addresses nothing.
fn effective_key(segment: &Segment, scope: &Scope, root: &Value) -> Value {
    match segment {
        Segment::Index(key) => key.to_value(),
        Segment::Name(name) => Value::String(name.clone()),
        Segment::Variable(name) => scope.get(name).cloned().unwrap_or(Value::Null),
        // Nested paths are absolute: they restart from the root, not from the current node
        Segment::Nested(sub) => walk(sub, scope, root).node.cloned().unwrap_or(Value::Null),
    }
}

/// Look `key` up in `node`. Only mappings and lists have children.
pub fn step<'a>(node: &'a Value, key: &Value) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(&key.as_field()?),
        Value::Array(items) => items.get(key.as_index()?),
        _ => None,
    }
}

pub fn step_mut<'a>(node: &'a mut Value, key: &Value) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(&key.as_field()?),
        Value::Array(items) => items.get_mut(key.as_index()?),
        _ => None,
    }
}

/// Re-walk recorded keys from the root with mutable access.
pub fn lookup_mut<'a>(document: &'a mut Value, keys: &[Value]) -> Option<&'a mut Value> {
    keys.iter()
        .try_fold(document, |node, key| step_mut(node, key))
}
