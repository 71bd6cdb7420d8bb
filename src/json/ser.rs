//! `serde` support.
//!
//! Lets a [`Value`] be handed to any serde data format. Numbers go out as
//! `f64`, mirroring the single numeric representation of the model.

use serde::{Serialize, Serializer};

use super::value::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(a) => serializer.collect_seq(a.iter()),
            Value::Object(o) => serializer.collect_map(o.iter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_into_serde_json() {
        let value = Value::from([
            ("name", Value::from("matt")),
            ("tags", Value::from(vec![Value::from(true), Value::Null])),
            ("n", Value::from(2.5)),
        ]);
        let converted = serde_json::to_value(&value).unwrap();
        assert_eq!(
            converted,
            serde_json::json!({"name": "matt", "tags": [true, null], "n": 2.5})
        );
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Value::from("a\"b")).unwrap(), r#""a\"b""#);
    }
}
