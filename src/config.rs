//! Configuration Module
//!
//! Construction options with silent fallback to defaults.
//!
//! Invalid or missing values never fail construction; they are normalized to
//! the defaults so building a cache is total.

use std::env;

use serde::Serialize;

/// Cache construction parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. Unparseable values fall back silently to the defaults.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Maximum number of entries the cache can hold; 0 disables caching
    pub capacity_entries: usize,
    /// Entry lifetime in whole seconds; 0 disables expiry
    pub ttl_seconds: u64,
    /// Background purge task interval in seconds
    pub purge_interval_seconds: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LOOKUP_CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `LOOKUP_CACHE_TTL` - Entry lifetime in seconds (default: 300)
    /// - `LOOKUP_CACHE_PURGE_INTERVAL` - Purge frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            capacity_entries: env::var("LOOKUP_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            ttl_seconds: env::var("LOOKUP_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            purge_interval_seconds: env::var("LOOKUP_CACHE_PURGE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_entries: 1000,
            ttl_seconds: 300,
            purge_interval_seconds: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity_entries, 1000);
        assert_eq!(config.ttl_seconds, 300);
        assert_eq!(config.purge_interval_seconds, 1);
    }

    #[test]
    fn test_config_from_env() {
        // single test so the env mutations cannot race each other

        // missing values fall back to defaults
        env::remove_var("LOOKUP_CACHE_CAPACITY");
        env::remove_var("LOOKUP_CACHE_TTL");
        env::remove_var("LOOKUP_CACHE_PURGE_INTERVAL");
        let config = Config::from_env();
        assert_eq!(config.capacity_entries, 1000);
        assert_eq!(config.ttl_seconds, 300);
        assert_eq!(config.purge_interval_seconds, 1);

        // unparseable values fall back to defaults rather than failing
        env::set_var("LOOKUP_CACHE_CAPACITY", "not-a-number");
        env::set_var("LOOKUP_CACHE_TTL", "-5");
        let config = Config::from_env();
        assert_eq!(config.capacity_entries, 1000);
        assert_eq!(config.ttl_seconds, 300);

        // valid values are honored
        env::set_var("LOOKUP_CACHE_CAPACITY", "64");
        env::set_var("LOOKUP_CACHE_TTL", "0");
        env::set_var("LOOKUP_CACHE_PURGE_INTERVAL", "30");
        let config = Config::from_env();
        assert_eq!(config.capacity_entries, 64);
        assert_eq!(config.ttl_seconds, 0);
        assert_eq!(config.purge_interval_seconds, 30);

        env::remove_var("LOOKUP_CACHE_CAPACITY");
        env::remove_var("LOOKUP_CACHE_TTL");
        env::remove_var("LOOKUP_CACHE_PURGE_INTERVAL");
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"capacity_entries\":1000"));
        assert!(json.contains("\"ttl_seconds\":300"));
    }
}
