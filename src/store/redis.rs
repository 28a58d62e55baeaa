//! Redis Backend
//!
//! Blocking connection to a Redis server.

use std::sync::Mutex;

use ::redis::{Client, Commands, Connection};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::store::Store;

// == Redis Store ==
/// Store backed by a single blocking Redis connection.
///
/// The connection is guarded by a mutex, so concurrent callers sharing one
/// store are serialized one command at a time.
pub struct RedisStore {
    conn: Mutex<Connection>,
}

impl RedisStore {
    // == Constructor ==
    /// Opens a connection to the server described by `config`.
    ///
    /// Connection failures are returned as [`CacheError::Store`].
    pub fn connect(config: &Config) -> Result<Self> {
        let url = config.connection_url();
        let client = Client::open(url.as_str())?;
        let conn = client.get_connection()?;
        info!("Connected to Redis at {}", url);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> ::redis::RedisResult<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| CacheError::Internal("Redis connection lock poisoned".to_string()))?;
        Ok(f(&mut *conn)?)
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl Store for RedisStore {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        debug!("SET {} ({} bytes)", key, value.len());
        self.with_conn(|conn| conn.set::<_, _, ()>(key, value))
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        debug!("GET {}", key);
        self.with_conn(|conn| conn.get::<_, Option<Vec<u8>>>(key))
    }

    fn incr(&self, key: &str) -> Result<i64> {
        debug!("INCR {}", key);
        self.with_conn(|conn| ::redis::cmd("INCR").arg(key).query::<i64>(conn))
    }

    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        debug!("RPUSH {} ({} bytes)", key, value.len());
        self.with_conn(|conn| conn.rpush::<_, _, usize>(key, value))
    }

    fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        debug!("LRANGE {} {} {}", key, start, stop);
        self.with_conn(|conn| conn.lrange::<_, Vec<Vec<u8>>>(key, start, stop))
    }

    fn flushdb(&self) -> Result<()> {
        info!("FLUSHDB");
        self.with_conn(|conn| ::redis::cmd("FLUSHDB").query::<()>(conn))
    }
}
