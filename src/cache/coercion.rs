//! Coercion Module
//!
//! Strategies for turning retrieved bytes back into typed values.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::cache::value::format_float;
use crate::error::{CacheError, Result};

/// Caller-supplied conversion applied to raw retrieved bytes.
pub type CustomCoercion = Arc<dyn Fn(&[u8]) -> Result<Retrieved> + Send + Sync>;

// == Coercion ==
/// How [`crate::cache::CacheOps::get`] converts the bytes it reads.
#[derive(Clone, Default)]
pub enum Coercion {
    /// Return the bytes unchanged
    #[default]
    Raw,
    /// Decode as UTF-8 text
    Text,
    /// Decode as UTF-8, then parse a base-10 `i64`
    Integer,
    /// Decode as UTF-8, then parse an `f64`
    Float,
    /// Apply a caller-supplied function
    Custom(CustomCoercion),
}

impl Coercion {
    /// Wraps a function as a [`Coercion::Custom`].
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Retrieved> + Send + Sync + 'static,
    {
        Coercion::Custom(Arc::new(f))
    }

    /// Stable name used when rendering call arguments.
    pub fn name(&self) -> &'static str {
        match self {
            Coercion::Raw => "raw",
            Coercion::Text => "text",
            Coercion::Integer => "int",
            Coercion::Float => "float",
            Coercion::Custom(_) => "custom",
        }
    }

    /// Applies the strategy to bytes read from the store.
    ///
    /// Decode and parse failures are returned, never swallowed.
    pub fn apply(&self, raw: Vec<u8>) -> Result<Retrieved> {
        match self {
            Coercion::Raw => Ok(Retrieved::Bytes(raw)),
            Coercion::Text => decode_text(&raw).map(Retrieved::Text),
            Coercion::Integer => parse_int(&raw).map(Retrieved::Integer),
            Coercion::Float => parse_float(&raw).map(Retrieved::Float),
            Coercion::Custom(f) => f(&raw),
        }
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coercion({})", self.name())
    }
}

impl FromStr for Coercion {
    type Err = CacheError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "raw" => Ok(Coercion::Raw),
            "text" | "str" => Ok(Coercion::Text),
            "int" | "integer" => Ok(Coercion::Integer),
            "float" => Ok(Coercion::Float),
            "custom" => Err(CacheError::InvalidRequest(
                "custom coercion requires a function".to_string(),
            )),
            other => Err(CacheError::InvalidRequest(format!(
                "unknown coercion: {}",
                other
            ))),
        }
    }
}

// == Retrieved ==
/// A value read back from the cache after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieved {
    Bytes(Vec<u8>),
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Retrieved {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Retrieved::Bytes(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Retrieved::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Retrieved::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Retrieved::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl fmt::Display for Retrieved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Retrieved::Bytes(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            Retrieved::Text(text) => write!(f, "{}", text),
            Retrieved::Integer(n) => write!(f, "{}", n),
            Retrieved::Float(x) => write!(f, "{}", format_float(*x)),
        }
    }
}

// == Helpers ==
/// Decodes bytes as UTF-8 text.
pub fn decode_text(data: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(data)?.to_string())
}

/// Decodes bytes as UTF-8 and parses a base-10 integer, ignoring
/// surrounding ASCII whitespace.
pub fn parse_int(data: &[u8]) -> Result<i64> {
    Ok(std::str::from_utf8(data)?.trim().parse::<i64>()?)
}

/// Decodes bytes as UTF-8 and parses a float.
pub fn parse_float(data: &[u8]) -> Result<f64> {
    Ok(std::str::from_utf8(data)?.trim().parse::<f64>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_is_identity() {
        let result = Coercion::Raw.apply(b"\x00foo".to_vec()).unwrap();
        assert_eq!(result, Retrieved::Bytes(b"\x00foo".to_vec()));
    }

    #[test]
    fn test_text_and_numbers() {
        assert_eq!(
            Coercion::Text.apply(b"foo".to_vec()).unwrap(),
            Retrieved::Text("foo".to_string())
        );
        assert_eq!(
            Coercion::Integer.apply(b" 42\n".to_vec()).unwrap(),
            Retrieved::Integer(42)
        );
        assert_eq!(
            Coercion::Float.apply(b"2.5".to_vec()).unwrap(),
            Retrieved::Float(2.5)
        );
    }

    #[test]
    fn test_decode_failures_propagate() {
        assert!(matches!(
            Coercion::Text.apply(vec![0xff, 0xfe]),
            Err(CacheError::Utf8(_))
        ));
        assert!(matches!(
            Coercion::Integer.apply(b"foo".to_vec()),
            Err(CacheError::ParseInt(_))
        ));
        assert!(matches!(
            Coercion::Integer.apply(b"4.2".to_vec()),
            Err(CacheError::ParseInt(_))
        ));
        assert!(matches!(
            Coercion::Float.apply(b"x".to_vec()),
            Err(CacheError::ParseFloat(_))
        ));
    }

    #[test]
    fn test_custom() {
        let upper = Coercion::custom(|data| {
            Ok(Retrieved::Text(
                String::from_utf8_lossy(data).to_uppercase(),
            ))
        });
        assert_eq!(upper.name(), "custom");
        assert_eq!(
            upper.apply(b"foo".to_vec()).unwrap(),
            Retrieved::Text("FOO".to_string())
        );

        let failing = Coercion::custom(|_| Err(CacheError::Coercion("nope".to_string())));
        assert!(matches!(
            failing.apply(b"foo".to_vec()),
            Err(CacheError::Coercion(_))
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("int".parse::<Coercion>().unwrap().name(), "int");
        assert_eq!("str".parse::<Coercion>().unwrap().name(), "text");
        assert!(matches!(
            "custom".parse::<Coercion>(),
            Err(CacheError::InvalidRequest(_))
        ));
        assert!(matches!(
            "bogus".parse::<Coercion>(),
            Err(CacheError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_retrieved_display() {
        assert_eq!(Retrieved::Bytes(b"foo".to_vec()).to_string(), "foo");
        assert_eq!(Retrieved::Integer(42).to_string(), "42");
        assert_eq!(Retrieved::Float(2.0).to_string(), "2.0");
        assert_eq!(Retrieved::Integer(7).as_int(), Some(7));
        assert_eq!(Retrieved::Integer(7).as_str(), None);
    }
}
