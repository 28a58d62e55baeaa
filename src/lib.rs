//! Redis Cache - random-key storage over Redis
//!
//! Stores values under generated keys, reads them back with typed coercion,
//! and optionally records call counts and call history in the same store.

pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod store;

pub use cache::{Cache, CacheOps, Coercion, Retrieved, Value};
pub use config::Config;
pub use error::{CacheError, Result};
pub use instrument::{replay, CallHistory, CountCalls, Method};
pub use store::{MemoryStore, RedisStore, Store};
