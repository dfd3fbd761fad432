//! Conversions between stored values and serde types.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use cratestore_core::Value;

/// Convert a stored value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    // Convert to serde_json::Value first, then deserialize
    serde_json::from_value(value_to_json(value))
}

/// Convert a Rust type to a stored value via serde.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, serde_json::Error> {
    // Serialize to serde_json::Value first, then convert
    Ok(json_to_value(serde_json::to_value(data)?))
}

/// Convert a stored value to serde_json::Value.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(|v| value_to_json(v)).collect())
        }
        Value::Map(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to a stored value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Fallback for numbers outside both ranges
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| Rc::new(json_to_value(v)))
                .collect(),
        ),
        serde_json::Value::Object(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k, Rc::new(json_to_value(v))))
                .collect(),
        ),
    }
}
