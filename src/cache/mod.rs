//! Cache Module
//!
//! Stores values under random keys in an external store and reads them back
//! with an optional coercion.

mod coercion;
mod store;
mod value;


// Re-export public types
pub use coercion::{decode_text, parse_float, parse_int, Coercion, CustomCoercion, Retrieved};
pub use store::Cache;
pub use value::Value;

use crate::error::{CacheError, Result};
use crate::store::Store;

// == Cache Operations ==
/// The interface shared by [`Cache`] and the instrumentation layers that
/// wrap it.
pub trait CacheOps: Send + Sync {
    /// Stores `value` under a freshly generated key and returns the key.
    fn store(&self, value: Value) -> Result<String>;

    /// Reads `key`, applying `coercion` to the bytes found.
    ///
    /// Returns `Ok(None)` when the key is absent or holds an empty value.
    fn get(&self, key: &str, coercion: &Coercion) -> Result<Option<Retrieved>>;

    /// The store this cache writes to.
    fn backend(&self) -> &dyn Store;

    /// Reads `key` and decodes it as UTF-8 text.
    fn get_str(&self, key: &str) -> Result<Option<String>> {
        match self.get(key, &Coercion::Text)? {
            Some(Retrieved::Text(text)) => Ok(Some(text)),
            Some(other) => Err(unexpected(Coercion::Text, &other)),
            None => Ok(None),
        }
    }

    /// Reads `key` and parses it as a base-10 integer.
    fn get_int(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key, &Coercion::Integer)? {
            Some(Retrieved::Integer(n)) => Ok(Some(n)),
            Some(other) => Err(unexpected(Coercion::Integer, &other)),
            None => Ok(None),
        }
    }

    /// Reads `key` and applies `f` to the raw bytes.
    ///
    /// `f` is only called when the key holds a non-empty value; its errors
    /// are returned to the caller unchanged.
    fn get_with<T, F>(&self, key: &str, f: F) -> Result<Option<T>>
    where
        Self: Sized,
        F: FnOnce(&[u8]) -> Result<T>,
    {
        match self.get(key, &Coercion::Raw)? {
            Some(Retrieved::Bytes(raw)) => f(&raw).map(Some),
            Some(other) => Err(unexpected(Coercion::Raw, &other)),
            None => Ok(None),
        }
    }
}

fn unexpected(coercion: Coercion, retrieved: &Retrieved) -> CacheError {
    CacheError::Internal(format!(
        "{} coercion returned {:?}",
        coercion.name(),
        retrieved
    ))
}
