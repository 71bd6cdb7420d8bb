//! minijson - a minimal JSON value model with a recursive-descent parser
//! and a compact serializer.
//!
//! # Architecture
//!
//! - [`json`] - the [`Value`] model, [`load`]/[`loads`] and [`dump`]/[`dumps`]
//! - [`error`] - [`ParseError`] and [`TypeError`]
//!
//! Values are immutable once built and cheap to clone: containers sit
//! behind an `Arc`, so copies share one backing store and are safe to read
//! from several threads.
//!
//! ```
//! use minijson::{dumps, loads, Value};
//!
//! let value = Value::from([("foo", Value::from("matt")), ("value", Value::from(2))]);
//! let text = dumps(&value);
//! assert_eq!(loads(&text).unwrap(), value);
//! ```

// Library code reports failures through ParseError/TypeError, never panics.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod json;

// Re-export commonly used types
pub use error::{ParseError, ParseResult, TypeError, TypeResult};
pub use json::{
    dump, dump_with, dumps, dumps_with, load, load_with, loads, loads_with, Array, DumpOptions,
    Object, ParseOptions, Type, Value,
};
