//! JSON value model.
//!
//! [`Value`] is a closed tagged union over the six JSON variants. Payloads
//! that own heap data sit behind an [`Arc`], so cloning a value is a
//! reference-count bump and every copy reads the same immutable backing
//! store. There is no mutation API: containers are built as plain
//! [`Array`]/[`Object`] collections first and wrapped afterwards.
//!
//! Two lookup flavours exist:
//!
//! - strict: typed accessors ([`Value::string`], [`Value::object`], ...) and
//!   [`Value::get`]/[`Value::at`] fail with [`TypeError`] on a variant mismatch
//! - lenient: `value["key"]` and `value[index]` never fail and yield
//!   [`Value::Null`] for mismatches, missing keys and out-of-range indices

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use super::options::DumpOptions;
use super::writer::Writer;
use crate::error::{TypeError, TypeResult};

/// Ordered sequence payload of [`Value::Array`].
pub type Array = Vec<Value>;

/// Key/value payload of [`Value::Object`]. Iteration order is unspecified.
pub type Object = HashMap<String, Value>;

static NULL: Value = Value::Null;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// [`Value::String`]
    String,
    /// [`Value::Number`]
    Number,
    /// [`Value::Array`]
    Array,
    /// [`Value::Object`]
    Object,
    /// [`Value::Null`]
    Null,
    /// [`Value::Boolean`]
    Boolean,
}

impl Type {
    /// Lowercase name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Type::String => "string",
            Type::Number => "number",
            Type::Array => "array",
            Type::Object => "object",
            Type::Null => "null",
            Type::Boolean => "boolean",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON datum.
///
/// Equality is structural; objects compare as maps, so key order never
/// matters.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON `null`
    #[default]
    Null,
    /// JSON `true`/`false`
    Boolean(bool),
    /// Every JSON number, integral or not
    Number(f64),
    /// JSON string
    String(Arc<str>),
    /// JSON array
    Array(Arc<Array>),
    /// JSON object
    Object(Arc<Object>),
}

impl Value {
    /// Returns the active variant tag.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Null => Type::Null,
            Value::Boolean(_) => Type::Boolean,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        self.type_of().name()
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns the string payload, or a [`TypeError`] for any other variant.
    pub fn string(&self) -> TypeResult<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(Type::String)),
        }
    }

    /// Returns the number payload, or a [`TypeError`] for any other variant.
    pub fn number(&self) -> TypeResult<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(other.mismatch(Type::Number)),
        }
    }

    /// Returns the array payload, or a [`TypeError`] for any other variant.
    pub fn array(&self) -> TypeResult<&Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch(Type::Array)),
        }
    }

    /// Returns the object payload, or a [`TypeError`] for any other variant.
    pub fn object(&self) -> TypeResult<&Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.mismatch(Type::Object)),
        }
    }

    /// Returns the boolean payload, or a [`TypeError`] for any other variant.
    pub fn boolean(&self) -> TypeResult<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(Type::Boolean)),
        }
    }

    /// Looks up `key` in an object.
    ///
    /// Fails with [`TypeError`] when `self` is not an object; a missing key
    /// yields [`Value::Null`].
    pub fn get(&self, key: &str) -> TypeResult<&Value> {
        Ok(self.object()?.get(key).unwrap_or(&NULL))
    }

    /// Looks up `index` in an array.
    ///
    /// Fails with [`TypeError`] when `self` is not an array; an index past
    /// the end yields [`Value::Null`].
    pub fn at(&self, index: usize) -> TypeResult<&Value> {
        Ok(self.array()?.get(index).unwrap_or(&NULL))
    }

    fn mismatch(&self, expected: Type) -> TypeError {
        TypeError {
            expected,
            found: self.type_of(),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self {
            Value::Object(o) => o.get(key).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Array(a) => a.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl fmt::Display for Value {
    /// Compact JSON, identical to [`dumps`](crate::dumps).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Writer::new(f, DumpOptions::default()).write_value(self)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[allow(clippy::cast_lossless, clippy::cast_precision_loss)]
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::from(s))
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(Arc::new(a))
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(Arc::new(o))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Object literal: `Value::from([("name", Value::from("x")), ("n", 2.into())])`.
///
/// Later pairs overwrite earlier ones with the same key.
impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Value {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let object: Object = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Value::from(object)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::from(iter.into_iter().collect::<Array>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_variant() -> Vec<Value> {
        vec![
            Value::Null,
            Value::from(true),
            Value::from(1.5),
            Value::from("s"),
            Value::from(Array::new()),
            Value::from(Object::new()),
        ]
    }

    #[test]
    fn test_default_is_null() {
        assert!(Value::default().is_null());
        assert_eq!(Value::default().type_of(), Type::Null);
    }

    #[test]
    fn test_exactly_one_tag() {
        for value in every_variant() {
            let tags = [
                value.is_string(),
                value.is_number(),
                value.is_array(),
                value.is_object(),
                value.is_null(),
                value.is_boolean(),
            ];
            assert_eq!(tags.iter().filter(|t| **t).count(), 1, "{value:?}");
        }
    }

    #[test]
    fn test_wrong_accessor_is_type_error() {
        for value in every_variant() {
            let found = value.type_of();
            let checks = [
                (Type::String, value.string().is_ok()),
                (Type::Number, value.number().is_ok()),
                (Type::Array, value.array().is_ok()),
                (Type::Object, value.object().is_ok()),
                (Type::Boolean, value.boolean().is_ok()),
            ];
            for (ty, ok) in checks {
                assert_eq!(ok, ty == found, "{ty} accessor on {found}");
            }
        }

        let err = Value::from(3).string().unwrap_err();
        assert_eq!(err.expected, Type::String);
        assert_eq!(err.found, Type::Number);
    }

    #[test]
    fn test_numbers_normalize() {
        assert_eq!(Value::from(1).number(), Ok(1.0));
        assert_eq!(Value::from(1.1).number(), Ok(1.1));
        assert_eq!(Value::from(7u64).number(), Ok(7.0));
        assert_eq!(Value::from(-2i64), Value::Number(-2.0));
    }

    #[test]
    fn test_object_literal() {
        let value = Value::from([
            ("foo", Value::from("matt")),
            ("value", Value::from(2)),
            ("baz", Value::Null),
        ]);
        assert_eq!(value["foo"].string(), Ok("matt"));
        assert_eq!(value["value"].number(), Ok(2.0));
        assert!(value["baz"].is_null());
        assert_eq!(value.object().unwrap().len(), 3);
    }

    #[test]
    fn test_object_literal_last_write_wins() {
        let value = Value::from([("k", 1), ("k", 2)]);
        assert_eq!(value["k"].number(), Ok(2.0));
    }

    #[test]
    fn test_lenient_index() {
        let value: Value = vec![Value::from(true), Value::from("str")].into();
        assert_eq!(value[1].string(), Ok("str"));
        assert!(value[5].is_null());
        assert!(value["key"].is_null());
        assert!(Value::from(1)["x"][0].is_null());
    }

    #[test]
    fn test_strict_lookup() {
        let value = Value::from([("a", true)]);
        assert_eq!(value.get("a").unwrap().boolean(), Ok(true));
        assert!(value.get("missing").unwrap().is_null());
        assert_eq!(value.at(0).unwrap_err().found, Type::Object);

        let array: Value = [Value::from(1), Value::from(2)].into_iter().collect();
        assert_eq!(array.at(1).unwrap().number(), Ok(2.0));
        assert!(array.at(2).unwrap().is_null());
        assert_eq!(array.get("a").unwrap_err().expected, Type::Object);
    }

    #[test]
    fn test_clones_share_payload() {
        let value = Value::from(vec![Value::from("a")]);
        let copy = value.clone();
        match (&value, &copy) {
            (Value::Array(a), Value::Array(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected arrays"),
        }
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<bool>).is_null());
        assert_eq!(Value::from(Some("x")).string(), Ok("x"));
    }

    #[test]
    fn test_values_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Value>();
    }
}
