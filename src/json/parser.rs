//! Recursive descent JSON parser.
//!
//! Dispatches on the first non-whitespace byte of each value and recurses
//! into arrays and objects. Everything below the structural level is read
//! by [`Reader`].

use std::io::BufRead;

use super::options::ParseOptions;
use super::reader::Reader;
use super::value::{Array, Object, Value};
use crate::error::{ParseError, ParseResult};

/// JSON parser over a buffered byte stream.
pub struct Parser<R> {
    reader: Reader<R>,
    options: ParseOptions,
    depth: usize,
}

impl<R: BufRead> Parser<R> {
    /// Create a new parser for the given input.
    pub fn new(input: R, options: ParseOptions) -> Self {
        Self {
            reader: Reader::new(input),
            options,
            depth: 0,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Parse a single JSON value.
    pub fn parse_value(&mut self) -> ParseResult<Value> {
        self.reader.skip_whitespace()?;

        match self.reader.peek()? {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => Ok(Value::from(self.reader.read_string()?)),
            Some(b't') => {
                self.reader.expect_literal(b"true")?;
                Ok(Value::Boolean(true))
            }
            Some(b'f') => {
                self.reader.expect_literal(b"false")?;
                Ok(Value::Boolean(false))
            }
            Some(b'n') => {
                self.reader.expect_literal(b"null")?;
                Ok(Value::Null)
            }
            Some(b'-' | b'0'..=b'9') => Ok(Value::Number(self.reader.read_number()?)),
            Some(b) => Err(ParseError::UnexpectedToken {
                found: char::from(b),
                offset: self.reader.position(),
            }),
            None => Err(ParseError::UnexpectedEof { context: "value" }),
        }
    }

    /// Ensure only whitespace remains.
    pub fn finish(&mut self) -> ParseResult<()> {
        self.reader.skip_whitespace()?;
        match self.reader.peek()? {
            None => Ok(()),
            Some(_) => Err(ParseError::TrailingCharacters {
                offset: self.reader.position(),
            }),
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                depth: self.depth,
                max: self.options.max_depth,
            });
        }
        Ok(())
    }

    /// Parse a JSON object. Duplicate keys keep the last value.
    fn parse_object(&mut self) -> ParseResult<Value> {
        self.enter()?;
        self.reader.expect(b'{')?;
        self.reader.skip_whitespace()?;

        let mut object = Object::new();
        let mut after_comma = false;

        loop {
            match self.reader.peek()? {
                None => return Err(ParseError::UnterminatedObject),
                Some(b'}') if !after_comma || self.options.allow_trailing_commas => {
                    self.reader.advance()?;
                    break;
                }
                Some(_) => {}
            }

            let key = self.reader.read_string()?;
            self.reader.skip_whitespace()?;
            self.reader.expect(b':')?;
            let value = self.parse_value()?;
            object.insert(key, value);

            self.reader.skip_whitespace()?;
            let offset = self.reader.position();
            match self.reader.advance()? {
                Some(b',') => {
                    self.reader.skip_whitespace()?;
                    after_comma = true;
                }
                Some(b'}') => break,
                Some(_) => {
                    return Err(ParseError::Expected {
                        expected: "',' or '}'".to_string(),
                        offset,
                    })
                }
                None => return Err(ParseError::UnterminatedObject),
            }
        }

        self.depth -= 1;
        log::trace!("parsed object with {} fields", object.len());
        Ok(Value::from(object))
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> ParseResult<Value> {
        self.enter()?;
        self.reader.expect(b'[')?;
        self.reader.skip_whitespace()?;

        let mut array = Array::new();
        let mut after_comma = false;

        loop {
            match self.reader.peek()? {
                None => return self.unterminated_array(),
                Some(b']') if !after_comma || self.options.allow_trailing_commas => {
                    self.reader.advance()?;
                    break;
                }
                Some(_) => {}
            }

            array.push(self.parse_value()?);

            self.reader.skip_whitespace()?;
            let offset = self.reader.position();
            match self.reader.advance()? {
                Some(b',') => {
                    self.reader.skip_whitespace()?;
                    after_comma = true;
                }
                Some(b']') => break,
                Some(_) => {
                    return Err(ParseError::Expected {
                        expected: "',' or ']'".to_string(),
                        offset,
                    })
                }
                None => return self.unterminated_array(),
            }
        }

        self.depth -= 1;
        log::trace!("parsed array with {} elements", array.len());
        Ok(Value::from(array))
    }

    fn unterminated_array(&mut self) -> ParseResult<Value> {
        if self.options.lenient_arrays {
            log::debug!(
                "unterminated array at byte {}, returning null",
                self.reader.position()
            );
            self.depth -= 1;
            Ok(Value::Null)
        } else {
            Err(ParseError::UnterminatedArray)
        }
    }
}

/// Parse one JSON value from a buffered reader with strict options.
///
/// The reader is left positioned just past the value; anything after it is
/// not inspected. Pass `&mut reader` to keep using the stream afterwards.
pub fn load<R: BufRead>(reader: R) -> ParseResult<Value> {
    load_with(reader, ParseOptions::default())
}

/// Parse one JSON value from a buffered reader with custom options.
pub fn load_with<R: BufRead>(reader: R, options: ParseOptions) -> ParseResult<Value> {
    Parser::new(reader, options).parse_value()
}

/// Parse a complete JSON document with strict options.
pub fn loads(text: &str) -> ParseResult<Value> {
    loads_with(text, ParseOptions::default())
}

/// Parse a complete JSON document with custom options.
///
/// Trailing non-whitespace input fails unless
/// [`ParseOptions::allow_trailing`] is set.
pub fn loads_with(text: &str, options: ParseOptions) -> ParseResult<Value> {
    let mut parser = Parser::new(text.as_bytes(), options);
    let value = parser.parse_value()?;

    if options.allow_trailing {
        log::debug!("ignoring input after byte {}", parser.position());
    } else {
        parser.finish()?;
    }

    Ok(value)
}
