// tests/resolver_tests.rs

use serde_json::json;
use slotpath::{Bindings, CompiledPath, Model, PathCache, Scope, Value};

fn doc(v: serde_json::Value) -> Value {
    Value::from(v)
}

fn compile(text: &str) -> CompiledPath {
    CompiledPath::compile(text).unwrap()
}

fn bindings(pairs: Vec<(&str, Value)>) -> Bindings {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

// ============================================================================
// Literal segments
// ============================================================================

#[test]
fn test_field_then_index() {
    let d = doc(json!({"a": {"b": [10, 20]}}));
    let res = compile("a.b[0]").resolve(&Scope::new(), &d);

    assert!(res.ok);
    assert_eq!(res.node, Some(&Value::Integer(10)));
    assert_eq!(res.parent, Some(&doc(json!([10, 20]))));
    assert_eq!(res.last_key, Some(Value::Integer(0)));
    assert_eq!(
        res.resolved_keys,
        vec![Value::from("a"), Value::from("b"), Value::Integer(0)]
    );
}

#[test]
fn test_quoted_key() {
    let d = doc(json!({"a b": {"c": true}}));
    let res = compile(r#"["a b"].c"#).resolve(&Scope::new(), &d);
    assert_eq!(res.node, Some(&Value::Boolean(true)));
}

#[test]
fn test_index_past_end_is_undefined_but_ok() {
    let d = doc(json!({"list": [1]}));
    let res = compile("list[5]").resolve(&Scope::new(), &d);

    assert!(res.ok);
    assert_eq!(res.node, None);
    assert_eq!(res.parent, Some(&doc(json!([1]))));
}

#[test]
fn test_negative_index_is_undefined() {
    let d = doc(json!({"list": [1, 2]}));
    let res = compile("list[-1]").resolve(&Scope::new(), &d);
    assert_eq!(res.node, None);
}

#[test]
fn test_null_value_is_defined() {
    let d = doc(json!({"a": null}));
    let res = compile("a").resolve(&Scope::new(), &d);

    assert!(res.ok);
    assert_eq!(res.node, Some(&Value::Null));
}

// ============================================================================
// Failed walks
// ============================================================================

#[test]
fn test_missing_intermediate_fails() {
    let d = doc(json!({"a": {}}));
    let res = compile("a.missing.x").resolve(&Scope::new(), &d);

    assert!(!res.ok);
    assert_eq!(res.node, None);
    // State from the last step that ran: looking up `missing` in `a`
    assert_eq!(res.parent, Some(&doc(json!({}))));
    assert_eq!(res.last_key, Some(Value::from("missing")));
    assert_eq!(res.resolved_keys.len(), 2);
}

#[test]
fn test_missing_last_segment_is_still_ok() {
    let d = doc(json!({"a": {}}));
    let res = compile("a.missing").resolve(&Scope::new(), &d);

    assert!(res.ok);
    assert_eq!(res.node, None);
}

#[test]
fn test_stepping_through_scalar_fails() {
    let d = doc(json!({"a": 5}));
    let res = compile("a.b.c").resolve(&Scope::new(), &d);
    assert!(!res.ok);
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_variable_index() {
    let d = doc(json!({"items": [5, 6, 7]}));
    let scope = Scope::from(bindings(vec![("i", Value::Integer(1))]));
    let res = compile("items[$i]").resolve(&scope, &d);

    assert_eq!(res.node, Some(&Value::Integer(6)));
    assert_eq!(res.last_key, Some(Value::Integer(1)));
}

#[test]
fn test_variable_field_name() {
    let d = doc(json!({"users": {"ann": {"age": 30}}}));
    let scope = Scope::from(bindings(vec![("who", Value::from("ann"))]));
    let res = compile("users[$who].age").resolve(&scope, &d);
    assert_eq!(res.node, Some(&Value::Integer(30)));
}

#[test]
fn test_variable_from_parent_scope() {
    let d = doc(json!({"items": [5, 6, 7]}));
    let outer = Scope::from(bindings(vec![("i", Value::Integer(2))]));
    let inner = Scope::with_parent(outer);
    let res = compile("items[$i]").resolve(&inner, &d);
    assert_eq!(res.node, Some(&Value::Integer(7)));
}

#[test]
fn test_unbound_variable_addresses_nothing() {
    let d = doc(json!({"items": [5, 6, 7], "null": 1}));
    let res = compile("items[$nope]").resolve(&Scope::new(), &d);

    assert!(res.ok);
    assert_eq!(res.node, None);
    assert_eq!(res.last_key, Some(Value::Null));

    let res = compile("$nope").resolve(&Scope::new(), &d);
    assert_eq!(res.node, None);
}

// ============================================================================
// Nested paths
// ============================================================================

#[test]
fn test_nested_path_key() {
    let d = doc(json!({"a": {"x": 1}, "b": {"c": "x"}}));
    let res = compile("a[b.c]").resolve(&Scope::new(), &d);

    assert!(res.ok);
    assert_eq!(res.node, Some(&Value::Integer(1)));
    assert_eq!(res.last_key, Some(Value::from("x")));
}

#[test]
fn test_nested_path_is_absolute() {
    // `c` exists under `a`, but the nested path starts again from the root
    let d = doc(json!({"a": {"c": "inner", "x": 1, "y": 2}, "c": "y"}));
    let res = compile("a[c]").resolve(&Scope::new(), &d);
    assert_eq!(res.node, Some(&Value::Integer(2)));
}

#[test]
fn test_nested_path_numeric_value_indexes_list() {
    let d = doc(json!({"list": ["a", "b"], "sel": 1}));
    let res = compile("list[sel]").resolve(&Scope::new(), &d);
    assert_eq!(res.node, Some(&Value::from("b")));
}

#[test]
fn test_nested_path_with_variables() {
    let d = doc(json!({"rows": [{"id": "k"}], "by_id": {"k": 42}}));
    let scope = Scope::from(bindings(vec![("r", Value::Integer(0))]));
    let res = compile("by_id[rows[$r].id]").resolve(&scope, &d);
    assert_eq!(res.node, Some(&Value::Integer(42)));
}

// ============================================================================
// Idempotence and caching
// ============================================================================

#[test]
fn test_resolution_is_idempotent() {
    let d = doc(json!({"a": {"b": [1, 2, 3]}, "k": 2}));
    let path = compile("a.b[k]");
    let scope = Scope::new();

    assert_eq!(path.resolve(&scope, &d), path.resolve(&scope, &d));
}

#[test]
fn test_cache_hit_skips_parser() {
    let mut cache = PathCache::new();
    let d = doc(json!({"a": [1, 2]}));

    let first = cache.compile("a[1]").unwrap();
    let second = cache.compile("a[1]").unwrap();

    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(
        first.resolve(&Scope::new(), &d),
        second.resolve(&Scope::new(), &d)
    );
}

#[test]
fn test_models_do_not_share_caches() {
    let mut one = Model::new(doc(json!({"a": 1})));
    let mut two = Model::new(doc(json!({"a": 2})));

    one.get("a", &Bindings::new()).unwrap();
    assert!(one.cache().contains("a"));
    assert!(!two.cache().contains("a"));

    assert_eq!(two.get("a", &Bindings::new()).unwrap(), Some(&Value::Integer(2)));
}

#[test]
fn test_shared_cache_can_be_handed_over() {
    let mut one = Model::new(doc(json!({"a": 1})));
    one.get("a", &Bindings::new()).unwrap();
    let (_, cache) = one.into_parts();

    let mut two = Model::with_cache(doc(json!({"a": 2})), cache);
    two.get("a", &Bindings::new()).unwrap();
    assert_eq!(two.cache().stats().hits, 1);
}

#[test]
fn test_lookup_parse_error() {
    let mut model = Model::new(doc(json!({})));
    let err = model.lookup("a[", &Bindings::new()).unwrap_err();
    assert_eq!(err.line, 1);
}
