//! Cache store backends.
//!
//! [`CacheBackend`] is the seam between the services and the key/value store.
//! [`MemoryBackend`] keeps everything in-process; [`RedisBackend`](super::RedisBackend)
//! talks to a Redis server.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::error::CacheError;

/// Global statistics reported by a cache store since its own last reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendInfo {
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
    /// Number of keys currently stored
    pub keys: u64,
    /// Memory usage descriptor, e.g. `"1.17M"`
    pub used_memory_human: String,
}

/// Key/value store with TTL semantics and introspectable counters.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Live value for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key` for `ttl_secs` seconds.
    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError>;

    /// Removes `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Current keyspace statistics.
    async fn info(&self) -> Result<BackendInfo, CacheError>;
}

// == Memory Backend ==
/// In-process backend over a shared [`CacheStore`].
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryBackend {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Handle to the underlying store, shared with the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: a lookup updates LRU order and counters
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
        self.store.write().await.set(key, value, Some(ttl_secs))
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.write().await.delete(key))
    }

    async fn info(&self) -> Result<BackendInfo, CacheError> {
        let store = self.store.read().await;
        let stats = store.stats();
        Ok(BackendInfo {
            keyspace_hits: stats.keyspace_hits,
            keyspace_misses: stats.keyspace_misses,
            keys: store.len() as u64,
            used_memory_human: format_memory_human(store.used_memory() as u64),
        })
    }
}

/// Renders a byte count the way Redis' `used_memory_human` does.
pub fn format_memory_human(bytes: u64) -> String {
    const UNITS: [(&str, f64); 4] = [
        ("T", 1024.0 * 1024.0 * 1024.0 * 1024.0),
        ("G", 1024.0 * 1024.0 * 1024.0),
        ("M", 1024.0 * 1024.0),
        ("K", 1024.0),
    ];

    let value = bytes as f64;
    for (suffix, scale) in UNITS {
        if value >= scale {
            return format!("{:.2}{}", value / scale, suffix);
        }
    }
    format!("{}B", bytes)
}
