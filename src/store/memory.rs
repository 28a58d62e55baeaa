//! In-Memory Backend
//!
//! HashMap-backed store reproducing the Redis semantics the cache relies on.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::error::{CacheError, Result};
use crate::store::Store;

// == Stored Value ==
/// A value held under one key: a byte string or a list of byte strings.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StoredValue {
    Bytes(Vec<u8>),
    List(Vec<Vec<u8>>),
}

// == Memory Store ==
/// In-process store with Redis command semantics.
///
/// Type mismatches fail the way Redis does (`WRONGTYPE`), and INCR parses the
/// stored text as a signed 64-bit integer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of keys currently held.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    // == Is Empty ==
    /// Returns true if no keys are held.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, StoredValue>>> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Internal("memory store lock poisoned".to_string()))
    }
}

impl Store for MemoryStore {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        debug!("SET {} ({} bytes)", key, value.len());
        self.lock()?
            .insert(key.to_string(), StoredValue::Bytes(value.to_vec()));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        debug!("GET {}", key);
        match self.lock()?.get(key) {
            None => Ok(None),
            Some(StoredValue::Bytes(value)) => Ok(Some(value.clone())),
            Some(StoredValue::List(_)) => Err(CacheError::WrongType(key.to_string())),
        }
    }

    fn incr(&self, key: &str) -> Result<i64> {
        debug!("INCR {}", key);
        let mut entries = self.lock()?;
        let current = match entries.get(key) {
            None => 0,
            Some(StoredValue::Bytes(value)) => std::str::from_utf8(value)
                .ok()
                .and_then(|text| text.parse::<i64>().ok())
                .ok_or_else(|| CacheError::NotAnInteger(key.to_string()))?,
            Some(StoredValue::List(_)) => return Err(CacheError::WrongType(key.to_string())),
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::NotAnInteger(key.to_string()))?;
        entries.insert(
            key.to_string(),
            StoredValue::Bytes(next.to_string().into_bytes()),
        );
        Ok(next)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        debug!("RPUSH {} ({} bytes)", key, value.len());
        let mut entries = self.lock()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| StoredValue::List(Vec::new()));
        match entry {
            StoredValue::List(items) => {
                items.push(value.to_vec());
                Ok(items.len())
            }
            StoredValue::Bytes(_) => Err(CacheError::WrongType(key.to_string())),
        }
    }

    fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        debug!("LRANGE {} {} {}", key, start, stop);
        let entries = self.lock()?;
        let items = match entries.get(key) {
            None => return Ok(Vec::new()),
            Some(StoredValue::List(items)) => items,
            Some(StoredValue::Bytes(_)) => return Err(CacheError::WrongType(key.to_string())),
        };

        let len = items.len() as isize;
        let start = if start < 0 { (len + start).max(0) } else { start };
        let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
        if start > stop || start >= len {
            return Ok(Vec::new());
        }
        Ok(items[start as usize..=stop as usize].to_vec())
    }

    fn flushdb(&self) -> Result<()> {
        debug!("FLUSHDB");
        self.lock()?.clear();
        Ok(())
    }
}
