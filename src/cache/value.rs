//! Cache Value Module
//!
//! The values a caller can store, and how each is written to the store.

use serde::{Serialize, Serializer};

// == Value ==
/// A value accepted by [`crate::cache::CacheOps::store`].
///
/// The store keeps only the serialized bytes; the type is not recorded and
/// must be reapplied at read time with a [`crate::cache::Coercion`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Binary(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl Value {
    /// Serializes the value into the bytes sent with SET.
    ///
    /// Text is UTF-8, binary is written as-is, integers as base-10 text and
    /// floats as their shortest text form (integral floats keep `.0`).
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Text(text) => text.clone().into_bytes(),
            Value::Binary(bytes) => bytes.clone(),
            Value::Integer(n) => n.to_string().into_bytes(),
            Value::Float(x) => format_float(*x).into_bytes(),
        }
    }
}

/// Formats a float the way it is stored: `2.0`, `3.25`, `-0.5`.
pub(crate) fn format_float(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        x.to_string()
    }
}

// Binary renders as lossy UTF-8 so call logs stay readable.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(text) => serializer.serialize_str(text),
            Value::Binary(bytes) => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(x) => serializer.serialize_f64(*x),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Binary(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(bytes: &[u8; N]) -> Self {
        Value::Binary(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Binary(bytes)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x.into())
    }
}
