//! JSON serialization.
//!
//! A recursive walk that writes compact JSON straight into a sink; no
//! intermediate structure is built. Output rules:
//!
//! - strings are escaped symmetrically with the parser: `"` `\` and the
//!   short control escapes use their two-character form, other control
//!   characters use `\u00XX`
//! - finite numbers use the shortest text that parses back to the same
//!   `f64`; magnitudes outside `[1e-7, 1e21)` switch to exponent form
//! - NaN and infinities have no JSON spelling and are written as `null`
//! - object keys follow map order unless [`DumpOptions::sort_keys`] is set

use std::fmt;
use std::io;

use super::options::DumpOptions;
use super::value::{Array, Object, Value};

/// Serializer writing into any [`fmt::Write`] sink.
pub struct Writer<W> {
    out: W,
    options: DumpOptions,
}

impl<W: fmt::Write> Writer<W> {
    /// Create a writer over `out`.
    pub fn new(out: W, options: DumpOptions) -> Self {
        Self { out, options }
    }

    /// Serialize `value` and everything below it.
    pub fn write_value(&mut self, value: &Value) -> fmt::Result {
        match value {
            Value::Null => self.out.write_str("null"),
            Value::Boolean(true) => self.out.write_str("true"),
            Value::Boolean(false) => self.out.write_str("false"),
            Value::Number(n) => self.write_number(*n),
            Value::String(s) => self.write_string(s),
            Value::Array(a) => self.write_array(a),
            Value::Object(o) => self.write_object(o),
        }
    }

    fn write_number(&mut self, n: f64) -> fmt::Result {
        if !n.is_finite() {
            return self.out.write_str("null");
        }
        let magnitude = n.abs();
        if magnitude == 0.0 || (1e-7..1e21).contains(&magnitude) {
            write!(self.out, "{n}")
        } else {
            write!(self.out, "{n:e}")
        }
    }

    fn write_string(&mut self, s: &str) -> fmt::Result {
        self.out.write_char('"')?;
        for ch in s.chars() {
            match ch {
                '"' => self.out.write_str("\\\"")?,
                '\\' => self.out.write_str("\\\\")?,
                '\x08' => self.out.write_str("\\b")?,
                '\x0C' => self.out.write_str("\\f")?,
                '\n' => self.out.write_str("\\n")?,
                '\r' => self.out.write_str("\\r")?,
                '\t' => self.out.write_str("\\t")?,
                c if c < '\x20' => write!(self.out, "\\u{:04x}", u32::from(c))?,
                c => self.out.write_char(c)?,
            }
        }
        self.out.write_char('"')
    }

    fn write_array(&mut self, array: &Array) -> fmt::Result {
        self.out.write_char('[')?;
        for (i, value) in array.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.write_value(value)?;
        }
        self.out.write_char(']')
    }

    fn write_object(&mut self, object: &Object) -> fmt::Result {
        let mut entries: Vec<(&String, &Value)> = object.iter().collect();
        if self.options.sort_keys {
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        }

        self.out.write_char('{')?;
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            self.write_string(key)?;
            self.out.write_char(':')?;
            self.write_value(value)?;
        }
        self.out.write_char('}')
    }
}

/// Bridges [`fmt::Write`] onto an [`io::Write`], keeping the first I/O error.
struct IoAdapter<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> fmt::Write for IoAdapter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}

/// Write compact JSON for `value` to `writer`.
pub fn dump<W: io::Write>(value: &Value, writer: W) -> io::Result<()> {
    dump_with(value, writer, DumpOptions::default())
}

/// Write JSON for `value` to `writer` with custom options.
pub fn dump_with<W: io::Write>(value: &Value, writer: W, options: DumpOptions) -> io::Result<()> {
    let mut adapter = IoAdapter {
        inner: writer,
        error: None,
    };
    let result = Writer::new(&mut adapter, options).write_value(value);
    match (result, adapter.error) {
        (Ok(()), _) => Ok(()),
        (Err(_), Some(err)) => Err(err),
        (Err(_), None) => Err(io::Error::new(io::ErrorKind::Other, "formatter error")),
    }
}

/// Render `value` as compact JSON.
pub fn dumps(value: &Value) -> String {
    dumps_with(value, DumpOptions::default())
}

/// Render `value` as JSON with custom options.
pub fn dumps_with(value: &Value, options: DumpOptions) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail.
    let _ = Writer::new(&mut output, options).write_value(value);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_primitives() {
        assert_eq!(dumps(&Value::Null), "null");
        assert_eq!(dumps(&Value::Boolean(true)), "true");
        assert_eq!(dumps(&Value::Boolean(false)), "false");
        assert_eq!(dumps(&Value::from(2)), "2");
        assert_eq!(dumps(&Value::from(-1.25)), "-1.25");
    }

    #[test]
    fn test_dump_number_forms() {
        assert_eq!(dumps(&Value::from(100.192)), "100.192");
        assert_eq!(dumps(&Value::from(100e10)), "1000000000000");
        assert_eq!(dumps(&Value::from(1e21)), "1e21");
        assert_eq!(dumps(&Value::from(1e-8)), "1e-8");
        assert_eq!(dumps(&Value::from(1.5e-7)), "0.00000015");
        assert_eq!(dumps(&Value::from(0.0)), "0");
    }

    #[test]
    fn test_dump_non_finite_as_null() {
        assert_eq!(dumps(&Value::from(f64::NAN)), "null");
        assert_eq!(dumps(&Value::from(f64::INFINITY)), "null");
        assert_eq!(dumps(&Value::from(f64::NEG_INFINITY)), "null");
    }

    #[test]
    fn test_dump_string_escapes() {
        assert_eq!(dumps(&Value::from("hello")), "\"hello\"");
        assert_eq!(dumps(&Value::from("a\"b")), "\"a\\\"b\"");
        assert_eq!(dumps(&Value::from("a\\b")), "\"a\\\\b\"");
        assert_eq!(dumps(&Value::from("a\nb\tc")), "\"a\\nb\\tc\"");
        assert_eq!(dumps(&Value::from("\u{1}")), "\"\\u0001\"");
        assert_eq!(dumps(&Value::from("a/é")), "\"a/é\"");
    }

    #[test]
    fn test_dump_array() {
        let arr = Value::from(vec![Value::from(1), Value::Null, Value::from("x")]);
        assert_eq!(dumps(&arr), "[1,null,\"x\"]");
        assert_eq!(dumps(&Value::from(Array::new())), "[]");
    }

    #[test]
    fn test_dump_object() {
        assert_eq!(dumps(&Value::from(Object::new())), "{}");
        assert_eq!(dumps(&Value::from([("a", 1)])), "{\"a\":1}");
    }

    #[test]
    fn test_dump_sorted_keys() {
        let value = Value::from([("b", 2), ("a", 1), ("c", 3)]);
        assert_eq!(
            dumps_with(&value, DumpOptions::sorted()),
            "{\"a\":1,\"b\":2,\"c\":3}"
        );
    }

    #[test]
    fn test_dump_to_io_writer() {
        let value = Value::from([("k", Value::from(vec![Value::from(true)]))]);
        let mut out = Vec::new();
        dump(&value, &mut out).unwrap();
        assert_eq!(out, b"{\"k\":[true]}");
    }

    #[test]
    fn test_dump_reports_io_error() {
        struct Broken;
        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = dump(&Value::Null, Broken).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_display_matches_dumps() {
        let value = Value::from(vec![Value::from("s"), Value::from(1.5)]);
        assert_eq!(value.to_string(), dumps(&value));
    }
}
