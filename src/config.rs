//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default list cache lifetime: one day.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60 * 24;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime in seconds of the cached product listing
    pub cache_ttl: u64,
    /// Interval in seconds between sweeps of an expired listing
    pub cleanup_interval: u64,
    /// Insert the bootstrap products on startup
    pub seed_on_start: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CACHE_TTL` - Listing cache TTL in seconds (default: 86400)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SEED_ON_START` - `true`/`1` to seed bootstrap products (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            seed_on_start: env::var("SEED_ON_START")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_on_start),
        }
    }

    /// Listing cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Sweep interval as a `Duration`. Never zero.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            cleanup_interval: 60,
            seed_on_start: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
