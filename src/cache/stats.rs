//! Cache Statistics Module
//!
//! Keyspace counters of the in-memory cache store, mirroring what Redis
//! reports through `INFO stats`.

use serde::Serialize;

// == Cache Stats ==
/// Cumulative counters since the store was created.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub keyspace_hits: u64,
    /// Lookups for absent or expired keys
    pub keyspace_misses: u64,
    /// Entries evicted to respect the capacity bound
    pub evicted_keys: u64,
    /// Entries removed because their TTL elapsed
    pub expired_keys: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.keyspace_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.keyspace_misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evicted_keys += 1;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired_keys += count as u64;
    }

    /// Total lookups served.
    pub fn total_requests(&self) -> u64 {
        self.keyspace_hits + self.keyspace_misses
    }
}
