//! Byte cursor and token readers.
//!
//! [`Reader`] wraps any [`BufRead`] and exposes one byte of lookahead.
//! Peeking goes through `fill_buf`, so nothing is taken from the underlying
//! reader until the parser actually consumes it; after a value is parsed the
//! wrapped stream sits right behind its last byte.
//!
//! The token readers here (strings, numbers, literals) handle everything
//! below the structural level; [`Parser`](super::parser::Parser) drives them.

use std::io::{self, BufRead};

use crate::error::{ParseError, ParseResult};

/// Returns true for the bytes C's `isspace` accepts.
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Forward-only byte cursor over a buffered reader.
pub struct Reader<R> {
    inner: R,
    pos: u64,
}

impl<R: BufRead> Reader<R> {
    /// Wrap a buffered reader.
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Unwrap the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Peek at the current byte without consuming it.
    pub fn peek(&mut self) -> ParseResult<Option<u8>> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Consume and return the current byte.
    pub fn advance(&mut self) -> ParseResult<Option<u8>> {
        let b = self.peek()?;
        if b.is_some() {
            self.inner.consume(1);
            self.pos += 1;
        }
        Ok(b)
    }

    /// Skip whitespace characters.
    pub fn skip_whitespace(&mut self) -> ParseResult<()> {
        while let Some(b) = self.peek()? {
            if !is_space(b) {
                break;
            }
            self.advance()?;
        }
        Ok(())
    }

    /// Consume `expected` or fail naming it.
    pub fn expect(&mut self, expected: u8) -> ParseResult<()> {
        let offset = self.pos;
        if self.advance()? == Some(expected) {
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected: format!("'{}'", char::from(expected)),
                offset,
            })
        }
    }

    /// Match a keyword byte by byte.
    pub fn expect_literal(&mut self, literal: &[u8]) -> ParseResult<()> {
        for &b in literal {
            self.expect(b)?;
        }
        Ok(())
    }

    /// Read a quoted string, decoding escape sequences.
    pub fn read_string(&mut self) -> ParseResult<String> {
        self.expect(b'"')?;

        let mut bytes = Vec::new();
        loop {
            match self.advance()? {
                None => return Err(ParseError::UnterminatedString),
                Some(b'"') => break,
                Some(b'\\') => {
                    let ch = self.read_escape_sequence()?;
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
                Some(b) => bytes.push(b),
            }
        }

        String::from_utf8(bytes).map_err(|_| ParseError::InvalidUtf8 { offset: self.pos })
    }

    /// Read an escape sequence after a backslash.
    fn read_escape_sequence(&mut self) -> ParseResult<char> {
        let offset = self.pos;
        match self.advance()? {
            None => Err(ParseError::UnterminatedString),
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(),
            Some(b) => Err(ParseError::UnexpectedEscape {
                found: char::from(b),
                offset,
            }),
        }
    }

    /// Read the `XXXX` of a `\uXXXX` escape, pairing surrogates.
    fn read_unicode_escape(&mut self) -> ParseResult<char> {
        let unit = self.read_hex4()?;

        if (0xD800..=0xDBFF).contains(&unit) {
            if self.advance()? != Some(b'\\') || self.advance()? != Some(b'u') {
                return Err(self.invalid_unicode());
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.invalid_unicode());
            }
            let combined = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(combined).ok_or_else(|| self.invalid_unicode());
        }

        // Lone low surrogates fail here too.
        char::from_u32(u32::from(unit)).ok_or_else(|| self.invalid_unicode())
    }

    fn read_hex4(&mut self) -> ParseResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let digit = match self.advance()? {
                Some(b @ b'0'..=b'9') => b - b'0',
                Some(b @ b'a'..=b'f') => b - b'a' + 10,
                Some(b @ b'A'..=b'F') => b - b'A' + 10,
                Some(_) => return Err(self.invalid_unicode()),
                None => return Err(ParseError::UnterminatedString),
            };
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }

    fn invalid_unicode(&self) -> ParseError {
        ParseError::InvalidUnicodeEscape { offset: self.pos }
    }

    /// Read a number: `-? digits (. digits)? ([eE] [+-]? digits)?`.
    pub fn read_number(&mut self) -> ParseResult<f64> {
        let offset = self.pos;
        let mut text = String::new();

        if self.peek()? == Some(b'-') {
            self.take(&mut text)?;
        }

        // A leading zero stands alone; "01" stops after the "0".
        if self.peek()? == Some(b'0') {
            self.take(&mut text)?;
        } else if self.take_digits(&mut text)? == 0 {
            return Err(ParseError::InvalidNumber { text, offset });
        }

        if self.peek()? == Some(b'.') {
            self.take(&mut text)?;
            if self.take_digits(&mut text)? == 0 {
                return Err(ParseError::InvalidNumber { text, offset });
            }
        }

        if let Some(b'e' | b'E') = self.peek()? {
            self.take(&mut text)?;
            if let Some(b'+' | b'-') = self.peek()? {
                self.take(&mut text)?;
            }
            if self.take_digits(&mut text)? == 0 {
                return Err(ParseError::InvalidNumber { text, offset });
            }
        }

        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(ParseError::InvalidNumber { text, offset }),
        }
    }

    fn take(&mut self, text: &mut String) -> ParseResult<()> {
        if let Some(b) = self.advance()? {
            text.push(char::from(b));
        }
        Ok(())
    }

    fn take_digits(&mut self, text: &mut String) -> ParseResult<usize> {
        let mut count = 0;
        while let Some(b'0'..=b'9') = self.peek()? {
            self.take(text)?;
            count += 1;
        }
        Ok(count)
    }
}
