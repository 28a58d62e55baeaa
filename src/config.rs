//! Configuration Module
//!
//! Handles loading the store connection settings from environment variables.

use std::env;

/// Store connection configuration.
///
/// All values can be configured via environment variables and default to a
/// local Redis server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Redis server host
    pub host: String,
    /// Redis server port
    pub port: u16,
    /// Logical database index
    pub db: i64,
    /// Flush the selected database once at startup
    pub flush_on_start: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_HOST` - Server host (default: 127.0.0.1)
    /// - `REDIS_PORT` - Server port (default: 6379)
    /// - `REDIS_DB` - Database index (default: 0)
    /// - `FLUSH_ON_START` - Flush the database at startup (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("REDIS_HOST")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.host),
            port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            db: env::var("REDIS_DB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.db),
            flush_on_start: env::var("FLUSH_ON_START")
                .ok()
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.flush_on_start),
        }
    }

    /// Renders the `redis://host:port/db` URL the client connects to.
    pub fn connection_url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            db: 0,
            flush_on_start: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6379);
        assert_eq!(config.db, 0);
        assert!(!config.flush_on_start);
    }

    #[test]
    fn test_connection_url() {
        let config = Config {
            host: "cache.local".to_string(),
            port: 6380,
            db: 2,
            flush_on_start: false,
        };
        assert_eq!(config.connection_url(), "redis://cache.local:6380/2");
        assert_eq!(
            Config::default().connection_url(),
            "redis://127.0.0.1:6379/0"
        );
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("REDIS_HOST");
        env::remove_var("REDIS_PORT");
        env::remove_var("REDIS_DB");
        env::remove_var("FLUSH_ON_START");

        assert_eq!(Config::from_env(), Config::default());
    }
}
