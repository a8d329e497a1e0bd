//! A read-only cursor over one line of puzzle input.
//!
//! The cursor never mutates the text it walks; it only moves an offset forward. Every
//! operation that needs more input than is left fails with [`ParseError::Exhausted`].

use crate::error::ParseError;

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Cursor<'a> {
        Cursor {text, pos: 0}
    }

    pub fn offset(&self) -> usize {self.pos}

    pub fn rest(&self) -> &'a str {&self.text[self.pos ..]}

    pub fn is_empty(&self) -> bool {self.pos == self.text.len()}

    fn exhausted(&self, expected: impl Into<String>) -> ParseError {
        ParseError::Exhausted {expected: expected.into(), offset: self.pos}
    }

    pub fn peek(&self) -> Result<char, ParseError> {
        self.rest().chars().next().ok_or_else(|| self.exhausted("a character"))
    }

    /// Moves forward by `n` bytes, which must end on a character boundary.
    pub fn advance(&mut self, n: usize) -> Result<(), ParseError> {
        let rest = self.rest();
        if n > rest.len() {
            return Err(self.exhausted(format!("{} more bytes", n)));
        }
        if !rest.is_char_boundary(n) {
            let (at, found) = rest.char_indices().take_while(|&(ix, _)| ix < n).last().unwrap_or((0, '\0'));
            return Err(ParseError::Unexpected {
                expected: format!("a character boundary {} bytes on", n), found, offset: self.pos + at
            });
        }
        self.pos += n;
        Ok(())
    }

    /// Consumes the longest prefix whose characters all satisfy `pred`. May be empty.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[.. len]
    }

    pub fn eat_char(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Ok(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            },
            Ok(found) => Err(ParseError::Unexpected {
                expected: format!("{:?}", expected), found, offset: self.pos
            }),
            Err(_) => Err(self.exhausted(format!("{:?}", expected))),
        }
    }

    /// Consumes `literal` if the input starts with it; reports whether it did.
    pub fn eat_literal(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {false}
    }

    pub fn skip_spaces(&mut self) -> usize {
        self.take_while(|c| c.is_ascii_whitespace()).len()
    }

    /// Parses an optionally negative decimal integer.
    pub fn parse_int(&mut self) -> Result<i64, ParseError> {
        let start = self.pos;
        let negative = self.eat_literal("-");
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            self.pos = start;
            return Err(if self.is_empty() {
                self.exhausted("an integer")
            } else {
                ParseError::BadInt {offset: start}
            });
        }
        digits.bytes().try_fold(0i64, |acc, d| {
            let d = (d - b'0') as i64;
            acc.checked_mul(10).and_then(|acc|
                if negative {acc.checked_sub(d)} else {acc.checked_add(d)}
            )
        }).ok_or(ParseError::IntOverflow {offset: start})
    }

    pub fn expect_end(&self) -> Result<(), ParseError> {
        match self.peek() {
            Ok(found) => Err(ParseError::Unexpected {
                expected: "end of line".to_string(), found, offset: self.pos
            }),
            Err(_) => Ok(()),
        }
    }
}
