//! Store Module
//!
//! The command interface the cache speaks to its external key-value store,
//! plus a Redis backend and an in-memory backend with the same semantics.

mod memory;
mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

use crate::error::Result;

// == Store Trait ==
/// Minimal command set consumed from the external store.
///
/// Every call is one blocking round trip. Atomicity is whatever the backend
/// gives a single command; nothing here spans more than one.
pub trait Store: Send + Sync {
    /// SET: stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// GET: returns the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// INCR: atomically increments the integer under `key`, starting from 0.
    fn incr(&self, key: &str) -> Result<i64>;

    /// RPUSH: appends `value` to the list under `key` and returns its new length.
    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// LRANGE: returns the inclusive `start..=stop` slice of the list under
    /// `key`. Negative indices count from the end.
    fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// FLUSHDB: removes every key in the selected database.
    fn flushdb(&self) -> Result<()>;
}
