//! Parse path expressions line by line and show their segments

use std::io::BufRead;

use super::CliError;
use crate::{ParseError, parse};

/// One input line and what it parsed to.
#[derive(Debug)]
pub struct ParsedLine {
    pub text: String,
    pub result: Result<serde_json::Value, ParseError>,
}

/// Parse every line of `input`. Blank lines are skipped.
pub fn parse_lines<R: BufRead>(input: R) -> Result<Vec<ParsedLine>, CliError> {
    let mut parsed = Vec::new();
    for line in input.lines() {
        let text = line?;
        if text.trim().is_empty() {
            continue;
        }
        let result = parse(&text).map(|path| path.to_json());
        parsed.push(ParsedLine { text, result });
    }
    Ok(parsed)
}
