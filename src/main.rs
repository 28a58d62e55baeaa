//! Redis Cache demo
//!
//! Stores a few values in the configured Redis database, reads them back and
//! prints the recorded call history.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_cache::{
    replay, Cache, CacheOps, CallHistory, Coercion, Config, CountCalls, Method, Value,
};

fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: host={}, port={}, db={}",
        config.host, config.port, config.db
    );

    let cache = Cache::connect(&config)
        .with_context(|| format!("failed to connect to {}", config.connection_url()))?;
    if config.flush_on_start {
        cache.reset().context("failed to flush database")?;
        info!("Database flushed");
    }

    let cache = CallHistory::new(CountCalls::new(cache));

    let samples: [(Value, Coercion); 4] = [
        (Value::from("foo"), Coercion::Text),
        (Value::from(b"bar"), Coercion::Raw),
        (Value::from(42), Coercion::Integer),
        (Value::from(2.5), Coercion::Float),
    ];
    for (value, coercion) in samples {
        let key = cache.store(value)?;
        let retrieved = cache.get(&key, &coercion)?;
        println!("{} -> {:?}", key, retrieved);
    }

    print!("{}", replay(&cache, Method::Store)?);
    print!("{}", replay(&cache, Method::Get)?);

    Ok(())
}
