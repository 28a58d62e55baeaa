//! Cache Module
//!
//! Random-key storage and typed retrieval over a [`Store`].

use tracing::debug;
use uuid::Uuid;

use crate::cache::{CacheOps, Coercion, Retrieved, Value};
use crate::config::Config;
use crate::error::Result;
use crate::store::{RedisStore, Store};

// == Cache ==
/// Stores values under freshly generated keys and reads them back.
///
/// The cache owns its store handle. Construction has no side effects on the
/// store; clearing it is an explicit [`Cache::reset`].
#[derive(Debug)]
pub struct Cache<S = RedisStore> {
    store: S,
}

impl Cache<RedisStore> {
    /// Connects to the Redis server described by `config`.
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self::new(RedisStore::connect(config)?))
    }
}

impl<S: Store> Cache<S> {
    // == Constructor ==
    /// Creates a cache over an existing store handle.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // == Reset ==
    /// Flushes every key in the store's current database.
    pub fn reset(&self) -> Result<()> {
        self.store.flushdb()
    }

    // Empty values read as absent.
    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let raw = self.store.get(key)?.filter(|raw| !raw.is_empty());
        if raw.is_none() {
            debug!("Cache miss for {}", key);
        }
        Ok(raw)
    }
}

impl<S: Store> CacheOps for Cache<S> {
    fn store(&self, value: Value) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &value.to_bytes())?;
        debug!("Stored value under {}", key);
        Ok(key)
    }

    fn get(&self, key: &str, coercion: &Coercion) -> Result<Option<Retrieved>> {
        match self.fetch(key)? {
            Some(raw) => coercion.apply(raw).map(Some),
            None => Ok(None),
        }
    }

    fn backend(&self) -> &dyn Store {
        &self.store
    }
}
