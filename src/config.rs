//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{DEFAULT_CACHE_PREFIX, DEFAULT_QUOTA_BYTES};
use crate::window::DEFAULT_OVERSCAN;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace prepended to every cache key
    pub cache_prefix: String,
    /// TTL in seconds for signals stored without an explicit TTL
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Backing file for durable storage; in-memory when unset
    pub storage_path: Option<PathBuf>,
    /// Byte quota for the in-memory store
    pub storage_quota_bytes: usize,
    /// Seconds between background purges of stale entries, 0 disables
    pub sweep_interval: u64,
    /// Overscan used by the window endpoint when the request omits one
    pub default_overscan: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_PREFIX` - Key namespace (default: `signal_cache_`)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORAGE_PATH` - JSON file for durable storage (default: in-memory)
    /// - `STORAGE_QUOTA_BYTES` - In-memory store quota (default: 5 MiB)
    /// - `SWEEP_INTERVAL` - Background purge frequency in seconds (default: 0, off)
    /// - `DEFAULT_OVERSCAN` - Window overscan rows (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_prefix: env::var("CACHE_PREFIX")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.cache_prefix),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            storage_path: env::var("STORAGE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            storage_quota_bytes: parse_var("STORAGE_QUOTA_BYTES")
                .unwrap_or(defaults.storage_quota_bytes),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            default_overscan: parse_var("DEFAULT_OVERSCAN").unwrap_or(defaults.default_overscan),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            default_ttl: 300,
            server_port: 3000,
            storage_path: None,
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
            sweep_interval: 0,
            default_overscan: DEFAULT_OVERSCAN,
        }
    }
}
