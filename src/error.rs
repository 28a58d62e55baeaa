//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its store backends.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Connection or protocol failure reported by the Redis client
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Command issued against a key holding the wrong kind of value
    #[error("Wrong type for key: {0}")]
    WrongType(String),

    /// INCR on a value that is not a base-10 integer
    #[error("Value is not an integer: {0}")]
    NotAnInteger(String),

    /// Retrieved bytes are not valid UTF-8
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Retrieved text is not an integer
    #[error("Invalid integer: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// Retrieved text is not a float
    #[error("Invalid float: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// A custom coercion rejected the retrieved bytes
    #[error("Coercion failed: {0}")]
    Coercion(String),

    /// Call arguments could not be rendered for the history log
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Caller misuse, reported before any store call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
