#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Field name
    ///
    /// Must start with letter or underscore, followed by letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// user
    /// item_count
    /// _internal
    /// ```
    Identifier(String),

    /// Integer, optionally negative
    ///
    /// # Examples
    /// ```text
    /// 0
    /// 42
    /// -1
    /// ```
    Integer(i64),

    /// String literal enclosed in single or double quotes
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'item #1'
    /// ```
    String(String),

    /// Variable reference, resolved through the scope chain
    ///
    /// # Examples
    /// ```text
    /// $i
    /// $current_id
    /// ```
    Variable(String),

    /// Dot for field access
    Dot,

    /// Left bracket for index, variable or nested-path access
    LBracket,

    /// Right bracket
    RBracket,

    /// End of input
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier '{}'", name),
            Token::Integer(n) => write!(f, "integer {}", n),
            Token::String(s) => write!(f, "string {:?}", s),
            Token::Variable(name) => write!(f, "variable ${}", name),
            Token::Dot => write!(f, "'.'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}
