//! JSON value model, parsing and serialization.
//!
//! # Architecture
//!
//! - [`value`] - the [`Value`] tagged union and its accessors
//! - [`options`] - parser and serializer configuration
//! - [`reader`] - byte cursor with one byte of lookahead, token readers
//! - [`parser`] - recursive descent parser
//! - [`writer`] - compact serializer
//!
//! # Example
//!
//! ```
//! use minijson::json::{dumps_with, loads, DumpOptions};
//!
//! let value = loads(r#"{"b": [true, null], "a": 1}"#).unwrap();
//! assert_eq!(value["b"][0].boolean(), Ok(true));
//! assert!(value["missing"].is_null());
//!
//! let text = dumps_with(&value, DumpOptions::sorted());
//! assert_eq!(text, r#"{"a":1,"b":[true,null]}"#);
//! ```

pub mod options;
pub mod parser;
pub mod reader;
mod ser;
pub mod value;
pub mod writer;

pub use options::{DumpOptions, ParseOptions};
pub use parser::{load, load_with, loads, loads_with, Parser};
pub use value::{Array, Object, Type, Value};
pub use writer::{dump, dump_with, dumps, dumps_with};
