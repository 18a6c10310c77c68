// tests/parser_tests.rs

use serde_json::json;
use slotpath::ast::{Key, Path, Segment};
use slotpath::parse;

fn name(n: &str) -> Segment {
    Segment::Name(n.to_string())
}

fn index(n: i64) -> Segment {
    Segment::Index(Key::Int(n))
}

fn key(s: &str) -> Segment {
    Segment::Index(Key::Str(s.to_string()))
}

fn var(n: &str) -> Segment {
    Segment::Variable(n.to_string())
}

fn nested(segments: Vec<Segment>) -> Segment {
    Segment::Nested(Path::new(segments))
}

// ============================================================================
// Simple paths
// ============================================================================

#[test]
fn test_single_name() {
    assert_eq!(parse("todos").unwrap().segments(), &[name("todos")]);
}

#[test]
fn test_dotted_names() {
    assert_eq!(
        parse("a.b.c").unwrap().segments(),
        &[name("a"), name("b"), name("c")]
    );
}

#[test]
fn test_bracket_index() {
    assert_eq!(
        parse("a.b[0]").unwrap().segments(),
        &[name("a"), name("b"), index(0)]
    );
}

#[test]
fn test_dotted_integer_is_index() {
    assert_eq!(parse("a.0").unwrap().segments(), &[name("a"), index(0)]);
}

#[test]
fn test_negative_index() {
    assert_eq!(parse("a[-1]").unwrap().segments(), &[name("a"), index(-1)]);
}

#[test]
fn test_quoted_keys() {
    assert_eq!(
        parse(r#"a["b c"]['d']"#).unwrap().segments(),
        &[name("a"), key("b c"), key("d")]
    );
}

#[test]
fn test_whitespace_inside_brackets() {
    assert_eq!(parse("a[ 0 ]").unwrap(), parse("a[0]").unwrap());
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_bracket_variable() {
    assert_eq!(
        parse("items[$i]").unwrap().segments(),
        &[name("items"), var("i")]
    );
}

#[test]
fn test_leading_variable() {
    assert_eq!(
        parse("$row.name").unwrap().segments(),
        &[var("row"), name("name")]
    );
}

#[test]
fn test_dotted_variable() {
    assert_eq!(parse("a.$k").unwrap().segments(), &[name("a"), var("k")]);
}

// ============================================================================
// Nested paths
// ============================================================================

#[test]
fn test_nested_path() {
    assert_eq!(
        parse("a[b.c]").unwrap().segments(),
        &[name("a"), nested(vec![name("b"), name("c")])]
    );
}

#[test]
fn test_bare_identifier_in_brackets_is_nested() {
    assert_eq!(
        parse("list[x]").unwrap().segments(),
        &[name("list"), nested(vec![name("x")])]
    );
}

#[test]
fn test_nested_path_starting_with_variable() {
    assert_eq!(
        parse("a[$row.id]").unwrap().segments(),
        &[name("a"), nested(vec![var("row"), name("id")])]
    );
}

#[test]
fn test_deeply_nested_paths() {
    assert_eq!(
        parse("a[b[c[0]]]").unwrap().segments(),
        &[
            name("a"),
            nested(vec![name("b"), nested(vec![name("c"), index(0)])]),
        ]
    );
}

#[test]
fn test_leading_bracket() {
    assert_eq!(parse("[0].x").unwrap().segments(), &[index(0), name("x")]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_malformed_paths() {
    let cases = vec!["", "a.", "a..b", "a[", "a[]", "a[0", "a]", "a b", ".a", "a.[0]", "a.-1"];

    for input in cases {
        assert!(parse(input).is_err(), "Expected error for input: {:?}", input);
    }
}

#[test]
fn test_error_reports_column() {
    let err = parse("abc[0").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 6);
    assert!(err.message.contains("']'"), "{}", err.message);
}

#[test]
fn test_error_display() {
    let err = parse("a b").unwrap_err();
    assert_eq!(
        err.to_string(),
        "parse error at line 1, column 3: expected end of input, found identifier 'b'"
    );
}

// ============================================================================
// Purity and rendering
// ============================================================================

#[test]
fn test_parse_is_deterministic() {
    let text = r#"a[b.c][$i]["k"][0]"#;
    assert_eq!(parse(text).unwrap(), parse(text).unwrap());
}

#[test]
fn test_tagged_json_form() {
    let path = parse("a[b.c][$i][0]").unwrap();
    assert_eq!(
        path.to_json(),
        json!([
            ["n", "a"],
            ["m", [["n", "b"], ["n", "c"]]],
            ["v", "i"],
            ["i", 0]
        ])
    );
}

#[test]
fn test_display_escapes_only_what_the_lexer_reads() {
    let path = parse("a['say \"hi\"\\n']['\u{1}']").unwrap();
    assert_eq!(path.to_string(), "a[\"say \\\"hi\\\"\\n\"][\"\u{1}\"]");
    assert_eq!(parse(&path.to_string()).unwrap(), path);
}
