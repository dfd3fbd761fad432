//! The Value type - the dynamically-typed payload a store slot holds.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// A shared, immutable handle to a stored [`Value`].
///
/// The store hands these out instead of owned values: reads are zero-copy,
/// and a caller that wants to mutate must go through [`Rc::make_mut`], which
/// unshares first. Stored state can therefore never be modified through a
/// handle obtained from a read.
pub type ValueRef = Rc<Value>;

/// A tree-shaped value held by a store slot.
///
/// Containers hold their children as [`ValueRef`] handles, which makes the
/// store's shallow-copy rule cheap and observable: copying an `Array` or
/// `Map` allocates a new container whose children are the *same* handles as
/// the original's.
///
/// # Design Notes
///
/// - `BTreeMap` for deterministic ordering (stable comparison and display)
/// - `i64` integers and `f64` floats, matching JSON-shaped data
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value. Distinct from "path doesn't exist".
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of shared values.
    Array(Vec<ValueRef>),
    /// Key-value map with string keys.
    Map(BTreeMap<String, ValueRef>),
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Build an array from anything convertible to values.
    ///
    /// ```rust
    /// use cratestore_core::Value;
    ///
    /// let v = Value::array_of([1, 2, 3]);
    /// assert!(v.is_array());
    /// ```
    pub fn array_of<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Array(items.into_iter().map(|v| Rc::new(v.into())).collect())
    }

    /// Build a map from key/value pairs.
    pub fn map_of<K: Into<String>, T: Into<Value>>(
        entries: impl IntoIterator<Item = (K, T)>,
    ) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), Rc::new(v.into())))
                .collect(),
        )
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if this value is a map.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ValueRef]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ValueRef>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Copy a container one level deep; hand scalars back unchanged.
    ///
    /// This is the rule applied at every store and dispatch boundary:
    ///
    /// - `Array` → a new array sharing the original's element handles
    /// - `Map` → a new map sharing the original's entry handles
    /// - everything else → the same handle, untouched
    ///
    /// The copy is shallow only. Structure nested inside a container is
    /// shared between the copy and the original.
    ///
    /// ```rust
    /// use std::rc::Rc;
    /// use cratestore_core::Value;
    ///
    /// let original = Rc::new(Value::array_of(["a", "b"]));
    /// let copy = Value::shallow_copy(&original);
    ///
    /// assert!(!Rc::ptr_eq(&original, &copy));
    /// assert_eq!(original, copy);
    ///
    /// let scalar = Rc::new(Value::Integer(7));
    /// assert!(Rc::ptr_eq(&scalar, &Value::shallow_copy(&scalar)));
    /// ```
    pub fn shallow_copy(value: &ValueRef) -> ValueRef {
        match value.as_ref() {
            Value::Array(items) => Rc::new(Value::Array(items.clone())),
            Value::Map(entries) => Rc::new(Value::Map(entries.clone())),
            _ => Rc::clone(value),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items.into_iter().map(Rc::new).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k, Rc::new(v)))
                .collect(),
        )
    }
}
