//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

use tracing::warn;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Redis connection URL; the in-memory store is used when absent
    pub redis_url: Option<String>,
    /// Optional namespace prepended to data-cache keys
    pub cache_key_prefix: Option<String>,
    /// TTL in seconds of the full-collection snapshot
    pub data_cache_ttl: u64,
    /// TTL in seconds of rendered property-list responses
    pub response_cache_ttl: u64,
    /// Most rendered responses kept at once
    pub response_cache_max_entries: usize,
    /// Capacity of the in-memory cache store
    pub max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Insert the sample listings at startup
    pub seed_sample_data: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `REDIS_URL` - Redis URL (default: unset, in-memory store)
    /// - `CACHE_KEY_PREFIX` - Data-cache key namespace (default: none)
    /// - `DATA_CACHE_TTL` - Snapshot TTL in seconds (default: 3600)
    /// - `RESPONSE_CACHE_TTL` - Response TTL in seconds (default: 900)
    /// - `RESPONSE_CACHE_MAX_ENTRIES` - Stored response limit (default: 1000)
    /// - `MAX_ENTRIES` - In-memory store capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `SEED_SAMPLE_DATA` - Seed sample listings; accepts true/false,
    ///   1/0, yes/no, on/off (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            redis_url: non_empty_var("REDIS_URL"),
            cache_key_prefix: non_empty_var("CACHE_KEY_PREFIX"),
            data_cache_ttl: parse_var("DATA_CACHE_TTL").unwrap_or(defaults.data_cache_ttl),
            response_cache_ttl: parse_var("RESPONSE_CACHE_TTL")
                .unwrap_or(defaults.response_cache_ttl),
            response_cache_max_entries: parse_var("RESPONSE_CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.response_cache_max_entries),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            seed_sample_data: flag_var("SEED_SAMPLE_DATA").unwrap_or(defaults.seed_sample_data),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            redis_url: None,
            cache_key_prefix: None,
            data_cache_ttl: 3600,
            response_cache_ttl: 900,
            response_cache_max_entries: 1000,
            max_entries: 10_000,
            cleanup_interval: 1,
            seed_sample_data: false,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn flag_var(name: &str) -> Option<bool> {
    let raw = env::var(name).ok()?;
    let flag = parse_flag(&raw);
    if flag.is_none() {
        warn!(name, value = %raw, "ignoring unrecognized boolean setting");
    }
    flag
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
