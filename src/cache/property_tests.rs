//! Property-Based Tests for the in-memory cache store
//!
//! Uses proptest to check keyspace counters, capacity and delete semantics
//! under arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::CacheStore;

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("all_properties".to_string()),
        "[a-z]{1,3}".prop_map(|s| format!("views:{s}")),
    ]
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \\[\\]{},:\"]{0,128}"
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| StoreOp::Set { key, value }),
        key_strategy().prop_map(|key| StoreOp::Get { key }),
        key_strategy().prop_map(|key| StoreOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Hits and misses count exactly the lookups that found / missed a key.
    #[test]
    fn prop_keyspace_counters_match_lookups(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(1000);
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    store.set(&key, value, Some(3600)).unwrap();
                }
                StoreOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                StoreOp::Delete { key } => {
                    store.delete(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.keyspace_hits, expected_hits);
        prop_assert_eq!(stats.keyspace_misses, expected_misses);
    }

    /// The store agrees with a set model of live keys.
    #[test]
    fn prop_store_matches_key_model(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(1000);
        let mut live: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    store.set(&key, value, None).unwrap();
                    live.insert(key);
                }
                StoreOp::Get { key } => {
                    prop_assert_eq!(store.get(&key).is_some(), live.contains(&key));
                }
                StoreOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), live.remove(&key));
                }
            }
        }

        prop_assert_eq!(store.len(), live.len());
    }

    /// Capacity is never exceeded; evictions happen only on overflow.
    #[test]
    fn prop_capacity_enforced(
        capacity in 1usize..8,
        keys in prop::collection::vec("[a-z]{1,4}", 1..40),
    ) {
        let mut store = CacheStore::new(capacity);
        let mut distinct: HashSet<String> = HashSet::new();

        for key in &keys {
            store.set(key, "v".to_string(), None).unwrap();
            distinct.insert(key.clone());
            prop_assert!(store.len() <= capacity);
        }

        prop_assert_eq!(store.len(), distinct.len().min(capacity));
        if distinct.len() <= capacity {
            prop_assert_eq!(store.stats().evicted_keys, 0);
        } else {
            prop_assert!(store.stats().evicted_keys > 0);
        }
    }

    /// The most recently written key always survives eviction.
    #[test]
    fn prop_latest_write_survives(
        capacity in 1usize..5,
        keys in prop::collection::vec("[a-z]{1,3}", 1..30),
    ) {
        let mut store = CacheStore::new(capacity);
        for key in &keys {
            store.set(key, key.clone(), None).unwrap();
        }

        let last = keys.last().unwrap();
        prop_assert_eq!(store.get(last), Some(last.clone()));
    }
}
