//! LRU Tracker Module
//!
//! Least-recently-used ordering for the in-memory cache store's eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order with a monotonically increasing tick per touch.
///
/// `by_tick` is ordered oldest first, `ticks` maps a key to its latest tick.
#[derive(Debug, Default)]
pub struct LruTracker {
    next_tick: u64,
    by_tick: BTreeMap<u64, String>,
    ticks: HashMap<String, u64>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        let tick = self.next_tick;
        self.next_tick += 1;

        if let Some(previous) = self.ticks.insert(key.to_string(), tick) {
            self.by_tick.remove(&previous);
        }
        self.by_tick.insert(tick, key.to_string());
    }

    // == Remove ==
    /// Forgets a key.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.by_tick.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_tick.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}
