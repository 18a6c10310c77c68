use std::mem;

use thiserror::Error;

use crate::{
    ast::{Key, Path, Segment, Token},
    lexer::{Lexer, Position},
};

/// Malformed path syntax.
///
/// Carries the 1-based line and column where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(at: Position, message: impl Into<String>) -> Self {
        ParseError {
            line: at.line,
            column: at.column,
            message: message.into(),
        }
    }
}

/// Parse a path expression.
///
/// # Examples
///
/// ```
/// use slotpath::{parse, ast::{Key, Segment}};
///
/// let path = parse("a.b[0]").unwrap();
/// assert_eq!(
///     path.segments(),
///     &[
///         Segment::Name("a".into()),
///         Segment::Name("b".into()),
///         Segment::Index(Key::Int(0)),
///     ]
/// );
/// assert!(parse("a..b").is_err());
/// ```
pub fn parse(text: &str) -> Result<Path, ParseError> {
    Parser::new(Lexer::new(text))?.parse()
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_start: Position,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_start = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_start,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_start = self.lexer.token_start();
        Ok(())
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::new(
            self.current_start,
            format!("expected {}, found {}", expected, self.current_token),
        )
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if mem::discriminant(&self.current_token) != mem::discriminant(&expected) {
            return Err(self.unexpected(&expected.to_string()));
        }
        self.advance()
    }

    /// Parse a complete path; the whole input must be consumed.
    pub fn parse(&mut self) -> Result<Path, ParseError> {
        let path = self.parse_path()?;
        self.expect(Token::Eof)?;
        Ok(path)
    }

    fn parse_path(&mut self) -> Result<Path, ParseError> {
        let mut segments = vec![self.parse_head()?];
        self.parse_tail(&mut segments)?;
        Ok(Path::new(segments))
    }

    fn parse_head(&mut self) -> Result<Segment, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) => {
                self.advance()?;
                Ok(Segment::Name(name))
            }
            Token::Variable(name) => {
                self.advance()?;
                Ok(Segment::Variable(name))
            }
            Token::LBracket => {
                self.current_token = Token::LBracket;
                self.parse_bracket()
            }
            token => {
                self.current_token = token;
                Err(self.unexpected("field name, variable or '['"))
            }
        }
    }

    fn parse_tail(&mut self, segments: &mut Vec<Segment>) -> Result<(), ParseError> {
        loop {
            match self.current_token {
                Token::Dot => {
                    self.advance()?;
                    segments.push(self.parse_dotted()?);
                }
                Token::LBracket => segments.push(self.parse_bracket()?),
                _ => return Ok(()),
            }
        }
    }

    /// After '.', we expect a field name, an integer or a variable
    fn parse_dotted(&mut self) -> Result<Segment, ParseError> {
        let segment = match &self.current_token {
            Token::Identifier(name) => Segment::Name(name.clone()),
            Token::Integer(n) if *n >= 0 => Segment::Index(Key::Int(*n)),
            Token::Variable(name) => Segment::Variable(name.clone()),
            _ => return Err(self.unexpected("field name after '.'")),
        };
        self.advance()?;
        Ok(segment)
    }

    fn parse_bracket(&mut self) -> Result<Segment, ParseError> {
        self.expect(Token::LBracket)?;

        // Inside brackets, we can have:
        // 1. Integer -> Index
        // 2. String -> Index (field name with special chars)
        // 3. Variable alone -> Variable
        // 4. Anything path-like -> Nested, resolved from the root
        let segment = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Integer(n) => {
                self.advance()?;
                Segment::Index(Key::Int(n))
            }
            Token::String(s) => {
                self.advance()?;
                Segment::Index(Key::Str(s))
            }
            Token::Variable(name) => {
                self.advance()?;
                if self.current_token == Token::RBracket {
                    Segment::Variable(name)
                } else {
                    let mut segments = vec![Segment::Variable(name)];
                    self.parse_tail(&mut segments)?;
                    Segment::Nested(Path::new(segments))
                }
            }
            token @ (Token::Identifier(_) | Token::LBracket) => {
                self.current_token = token;
                Segment::Nested(self.parse_path()?)
            }
            token => {
                self.current_token = token;
                return Err(self.unexpected("index, string, variable or path inside '[]'"));
            }
        };

        self.expect(Token::RBracket)?;
        Ok(segment)
    }
}
