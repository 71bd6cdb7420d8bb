//! Error types for parsing and typed access.
//!
//! Two failure kinds exist:
//!
//! - [`ParseError`] - input text does not follow the JSON grammar at the
//!   current offset. Aborts the whole parse.
//! - [`TypeError`] - a typed accessor was called on a value holding a
//!   different variant.

use std::io;

use thiserror::Error;

use crate::json::Type;

/// Failure raised while turning text into a [`Value`](crate::Value).
///
/// Offsets are byte positions from the start of the consumed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A specific byte was required but something else was found
    #[error("expected {expected} at byte {offset}")]
    Expected {
        /// Human-readable description of what was expected
        expected: String,
        /// Offset of the offending byte
        offset: u64,
    },

    /// The leading byte of a value does not start any production
    #[error("unexpected token: '{found}' at byte {offset}")]
    UnexpectedToken {
        /// The byte that was found
        found: char,
        /// Offset of the offending byte
        offset: u64,
    },

    /// Input ended where a value was required
    #[error("unexpected end of input while parsing {context}")]
    UnexpectedEof {
        /// What the parser was looking for
        context: &'static str,
    },

    /// Input ended before the closing `"`
    #[error("unterminated string")]
    UnterminatedString,

    /// Input ended before the closing `}`
    #[error("unterminated object")]
    UnterminatedObject,

    /// Input ended before the closing `]`
    #[error("unterminated array")]
    UnterminatedArray,

    /// A backslash was followed by a character with no escape meaning
    #[error("unexpected escape sequence: '\\{found}' at byte {offset}")]
    UnexpectedEscape {
        /// The character after the backslash
        found: char,
        /// Offset of the escape character
        offset: u64,
    },

    /// A `\u` escape was malformed or encoded an unpaired surrogate
    #[error("invalid unicode escape at byte {offset}")]
    InvalidUnicodeEscape {
        /// Offset just past the faulty escape
        offset: u64,
    },

    /// Number text did not follow the numeric grammar
    #[error("invalid number '{text}' at byte {offset}")]
    InvalidNumber {
        /// The bytes consumed as the number
        text: String,
        /// Offset of the first byte of the number
        offset: u64,
    },

    /// String contents were not valid UTF-8
    #[error("invalid UTF-8 in string ending at byte {offset}")]
    InvalidUtf8 {
        /// Offset just past the closing quote
        offset: u64,
    },

    /// Non-whitespace input remained after a complete value
    #[error("trailing characters at byte {offset}")]
    TrailingCharacters {
        /// Offset of the first trailing byte
        offset: u64,
    },

    /// Arrays/objects nested deeper than the configured limit
    #[error("nesting too deep ({depth} > {max})")]
    NestingTooDeep {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// The underlying reader failed
    #[error("io error: {0}")]
    Io(String),
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        ParseError::Io(err.to_string())
    }
}

/// Failure raised by a typed accessor invoked on the wrong variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("type error: expected {expected}, found {found}")]
pub struct TypeError {
    /// Variant the caller asked for
    pub expected: Type,
    /// Variant the value actually holds
    pub found: Type,
}

/// Result alias for parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result alias for typed access.
pub type TypeResult<T> = Result<T, TypeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::Expected {
            expected: "':'".to_string(),
            offset: 7,
        };
        assert_eq!(err.to_string(), "expected ':' at byte 7");
        assert_eq!(ParseError::UnterminatedString.to_string(), "unterminated string");
        assert_eq!(
            ParseError::UnexpectedEscape { found: 'x', offset: 3 }.to_string(),
            "unexpected escape sequence: '\\x' at byte 3"
        );
    }

    #[test]
    fn test_type_error_message() {
        let err = TypeError {
            expected: Type::String,
            found: Type::Number,
        };
        assert_eq!(err.to_string(), "type error: expected string, found number");
    }

    #[test]
    fn test_io_error_conversion() {
        let err: ParseError = io::Error::new(io::ErrorKind::UnexpectedEof, "boom").into();
        assert!(matches!(err, ParseError::Io(ref msg) if msg == "boom"));
    }
}
