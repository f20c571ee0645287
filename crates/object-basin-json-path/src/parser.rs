//! Parser for JSONPath-like cursor expressions.
//!
//! Accepts the relaxed forms callers write for a key `k`: `k`, `.k`, `$k`,
//! `$.k`, `$['k']`, `$["k"]`, `$[k]`, `$.['k']` and `$.[k]`, chained with
//! `.field`, `[index]` and `['quoted field']`. Key names must not contain
//! `[` or `]`.

use crate::types::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Empty path")]
    Empty,
    #[error("Unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Invalid escape sequence")]
    InvalidEscape,
    #[error("Unclosed string")]
    UnclosedString,
    #[error("Invalid selector")]
    InvalidSelector,
    #[error("Unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("Invalid index: {0}")]
    InvalidIndex(String),
}

/// Cursor expression parser.
pub struct JsonPathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> JsonPathParser<'a> {
    /// Parse a cursor expression.
    pub fn parse(input: &'a str) -> Result<JsonPath, ParseError> {
        let mut parser = Self { input, pos: 0 };
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<JsonPath, ParseError> {
        if self.peek() == Some('$') {
            self.advance();
        }

        let mut selectors = Vec::new();

        // A bare leading name: `key...` or `$key...`.
        if !self.is_at_end() && !matches!(self.peek(), Some('.') | Some('[')) {
            selectors.push(Selector::Name(self.parse_name()?));
        }

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    match self.peek() {
                        Some('.') => return Err(ParseError::UnsupportedSelector("..".into())),
                        Some('[') => selectors.push(self.parse_bracket()?),
                        Some(_) => selectors.push(Selector::Name(self.parse_name()?)),
                        None => return Err(ParseError::UnexpectedEnd),
                    }
                }
                '[' => selectors.push(self.parse_bracket()?),
                other => return Err(ParseError::UnexpectedChar(other)),
            }
        }

        if selectors.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(JsonPath::new(selectors))
    }

    fn parse_bracket(&mut self) -> Result<Selector, ParseError> {
        self.expect('[')?;
        let selector = match self.peek() {
            Some('\'') | Some('"') => Selector::Name(self.parse_string()?),
            Some(_) => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == ']' {
                        break;
                    }
                    self.advance();
                }
                Self::classify_raw(&self.input[start..self.pos])?
            }
            None => return Err(ParseError::UnexpectedEnd),
        };
        self.expect(']')?;
        Ok(selector)
    }

    /// Unquoted bracket content is an index when it is all digits and a
    /// key name otherwise.
    fn classify_raw(raw: &str) -> Result<Selector, ParseError> {
        if raw.is_empty() {
            return Err(ParseError::InvalidSelector);
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw
                .parse()
                .map(Selector::Index)
                .map_err(|_| ParseError::InvalidIndex(raw.to_string()));
        }
        if let Some(digits) = raw.strip_prefix('-') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::InvalidIndex(raw.to_string()));
            }
        }
        if raw == "*" || raw.starts_with('?') || raw.contains(':') || raw.contains(',') {
            return Err(ParseError::UnsupportedSelector(raw.to_string()));
        }
        Ok(Selector::Name(raw.to_string()))
    }

    fn parse_name(&mut self) -> Result<String, ParseError> {
        let start = self.pos;

        while let Some(c) = self.peek() {
            if matches!(c, '.' | '[' | ']') {
                break;
            }
            self.advance();
        }

        let name = &self.input[start..self.pos];
        match name {
            "" => Err(match self.peek() {
                Some(c) => ParseError::UnexpectedChar(c),
                None => ParseError::UnexpectedEnd,
            }),
            "*" => Err(ParseError::UnsupportedSelector(name.to_string())),
            _ => Ok(name.to_string()),
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let quote = self.peek().ok_or(ParseError::UnexpectedEnd)?;
        self.advance();

        let mut result = String::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedString),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('\\') => result.push('\\'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        _ => return Err(ParseError::InvalidEscape),
                    }
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }

        Ok(result)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(ParseError::UnexpectedChar(c)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(path: &str) -> Vec<String> {
        JsonPathParser::parse(path).unwrap().to_steps()
    }

    #[test]
    fn test_top_level_forms() {
        for path in ["k", ".k", "$k", "$.k", "$['k']", "$[\"k\"]", "$[k]", "$.['k']", "$.[k]"] {
            assert_eq!(names(path), vec!["k"], "{path}");
        }
    }

    #[test]
    fn test_nested_forms() {
        assert_eq!(names("key.b[0].t"), vec!["key", "b", "0", "t"]);
        assert_eq!(names("key.b.[0].t"), vec!["key", "b", "0", "t"]);
        assert_eq!(names("$['key'].b[0].t"), vec!["key", "b", "0", "t"]);
    }

    #[test]
    fn test_index_selector() {
        let path = JsonPathParser::parse("list[12]").unwrap();
        assert_eq!(path.selectors[1], Selector::Index(12));
    }

    #[test]
    fn test_raw_bracket_keeps_slash() {
        assert_eq!(names("$.[o/k]"), vec!["o/k"]);
    }

    #[test]
    fn test_quoted_escape() {
        assert_eq!(names(r"$['it\'s']"), vec!["it's"]);
    }

    #[test]
    fn test_empty_and_root_only() {
        assert_eq!(JsonPathParser::parse(""), Err(ParseError::Empty));
        assert_eq!(JsonPathParser::parse("$"), Err(ParseError::Empty));
    }

    #[test]
    fn test_unsupported_selectors() {
        assert!(matches!(
            JsonPathParser::parse("$.list[*]"),
            Err(ParseError::UnsupportedSelector(_))
        ));
        assert!(matches!(
            JsonPathParser::parse("$..name"),
            Err(ParseError::UnsupportedSelector(_))
        ));
        assert!(matches!(
            JsonPathParser::parse("$.list[?(@.a)]"),
            Err(ParseError::UnsupportedSelector(_))
        ));
        assert!(matches!(
            JsonPathParser::parse("$.list[0:2]"),
            Err(ParseError::UnsupportedSelector(_))
        ));
    }

    #[test]
    fn test_negative_index_rejected() {
        assert_eq!(
            JsonPathParser::parse("list[-1]"),
            Err(ParseError::InvalidIndex("-1".into()))
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(JsonPathParser::parse("$['k'"), Err(ParseError::UnexpectedEnd));
        assert_eq!(JsonPathParser::parse("$['k"), Err(ParseError::UnclosedString));
        assert_eq!(JsonPathParser::parse("k."), Err(ParseError::UnexpectedEnd));
        assert_eq!(JsonPathParser::parse("$[]"), Err(ParseError::InvalidSelector));
        assert_eq!(JsonPathParser::parse("k]"), Err(ParseError::UnexpectedChar(']')));
    }
}
