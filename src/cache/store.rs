//! Cache Store Module
//!
//! In-memory key/value engine behind [`MemoryBackend`](crate::cache::MemoryBackend):
//! HashMap storage with LRU eviction, TTL expiration and keyspace counters.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::CacheError;

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<String>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Keyspace statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous one and resetting its TTL.
    ///
    /// When the store is full the least recently used key is evicted.
    pub fn set(&mut self, key: &str, value: String, ttl: Option<u64>) -> Result<(), CacheError> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidEntry(format!(
                "Key must be between 1 and {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidEntry(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(CacheError::Unavailable(
                        "Cache is full and eviction failed".to_string(),
                    ))
                }
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        self.lru.touch(key);

        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`.
    ///
    /// Absent and expired keys both count as misses; expired entries are
    /// dropped on access.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expired(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes `key`, returning whether a live entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.remove_entry(key) {
            Some(entry) => !entry.is_expired(),
            None => false,
        }
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expired(expired_keys.len());
        expired_keys.len()
    }

    /// Approximate payload footprint: key and value bytes of every entry.
    pub fn used_memory(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, entry)| key.len() + entry.value.len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<String>> {
        self.lru.remove(key);
        self.entries.remove(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100);

        store.set("all_properties", "[]".to_string(), Some(3600)).unwrap();

        assert_eq!(store.get("all_properties").as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_missing_counts_miss() {
        let mut store = CacheStore::new(100);

        assert!(store.get("all_properties").is_none());
        assert_eq!(store.stats().keyspace_misses, 1);
        assert_eq!(store.stats().keyspace_hits, 0);
    }

    #[test]
    fn test_store_delete_is_idempotent() {
        let mut store = CacheStore::new(100);
        store.set("all_properties", "[]".to_string(), None).unwrap();

        assert!(store.delete("all_properties"));
        assert!(!store.delete("all_properties"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), None).unwrap();
        store.set("key1", "value2".to_string(), None).unwrap();

        assert_eq!(store.get("key1").as_deref(), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration_counts_miss() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), Some(1)).unwrap();
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(1100));

        assert!(store.get("key1").is_none());
        let stats = store.stats();
        assert_eq!(stats.keyspace_hits, 1);
        assert_eq!(stats.keyspace_misses, 1);
        assert_eq!(stats.expired_keys, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3);

        store.set("key1", "value1".to_string(), None).unwrap();
        store.set("key2", "value2".to_string(), None).unwrap();
        store.set("key3", "value3".to_string(), None).unwrap();
        store.get("key1");
        store.set("key4", "value4".to_string(), None).unwrap();

        assert_eq!(store.len(), 3);
        assert!(store.get("key2").is_none());
        assert!(store.get("key1").is_some());
        assert_eq!(store.stats().evicted_keys, 1);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), Some(1)).unwrap();
        store.set("key2", "value2".to_string(), Some(10)).unwrap();

        sleep(Duration::from_millis(1100));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_store_used_memory() {
        let mut store = CacheStore::new(100);
        store.set("abc", "12345".to_string(), None).unwrap();

        assert_eq!(store.used_memory(), 8);
    }

    #[test]
    fn test_store_rejects_bad_keys() {
        let mut store = CacheStore::new(100);

        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);
        assert!(matches!(
            store.set(&long_key, "v".to_string(), None),
            Err(CacheError::InvalidEntry(_))
        ));
        assert!(matches!(
            store.set("", "v".to_string(), None),
            Err(CacheError::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_store_accepts_large_values() {
        let mut store = CacheStore::new(100);
        let large = "x".repeat(9 * 1024 * 1024);

        store.set("all_properties", large.clone(), Some(3600)).unwrap();

        assert_eq!(store.get("all_properties").map(|v| v.len()), Some(large.len()));
    }
}
