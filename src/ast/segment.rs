use std::fmt;

use crate::value::Value;

/// A literal key written in brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// `[0]`, `[-1]`
    Int(i64),
    /// `["x"]`, `['a b']`
    Str(String),
}

impl Key {
    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(n) => Value::Integer(*n),
            Key::Str(s) => Value::String(s.clone()),
        }
    }
}

/// One step of a [`Path`].
///
/// `Index` and `Name` resolve identically; they are kept apart because they
/// come from different syntax (`[0]`/`["x"]` versus `.x`).
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Bracketed literal key
    ///
    /// # Examples
    /// ```text
    /// items[0]
    /// a["b c"]
    /// ```
    Index(Key),

    /// Dotted field name
    ///
    /// # Examples
    /// ```text
    /// a.b
    /// ```
    Name(String),

    /// Variable looked up in the scope chain at resolution time
    ///
    /// # Examples
    /// ```text
    /// items[$i]
    /// $row.name
    /// ```
    Variable(String),

    /// Bracketed sub-path, resolved from the document root; its value becomes the key
    ///
    /// # Examples
    /// ```text
    /// a[b.c]
    /// ```
    Nested(Path),
}

/// An ordered, immutable sequence of segments.
///
/// # Examples
///
/// ```
/// use slotpath::parse;
///
/// let path = parse("users[$i].tags[0]").unwrap();
/// assert_eq!(path.len(), 4);
/// assert_eq!(path.to_string(), "users[$i].tags[0]");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Path(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    /// Tagged-pair rendering: `[["n","a"],["i",0],["v","x"],["m",[...]]]`.
    pub fn to_json(&self) -> serde_json::Value {
        let pairs = self
            .0
            .iter()
            .map(|segment| match segment {
                Segment::Index(Key::Int(n)) => serde_json::json!(["i", n]),
                Segment::Index(Key::Str(s)) => serde_json::json!(["i", s]),
                Segment::Name(name) => serde_json::json!(["n", name]),
                Segment::Variable(name) => serde_json::json!(["v", name]),
                Segment::Nested(path) => serde_json::json!(["m", path.to_json()]),
            })
            .collect();
        serde_json::Value::Array(pairs)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Name(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Name(name) => write!(f, ".{}", name)?,
                Segment::Variable(name) if i == 0 => write!(f, "${}", name)?,
                Segment::Variable(name) => write!(f, "[${}]", name)?,
                Segment::Index(Key::Int(n)) => write!(f, "[{}]", n)?,
                Segment::Index(Key::Str(s)) => write!(f, "[\"{}\"]", escape(s))?,
                Segment::Nested(path) => write!(f, "[{}]", path)?,
            }
        }
        Ok(())
    }
}

/// Quote-safe form of a key, using only the escapes the lexer reads back.
fn escape(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}
