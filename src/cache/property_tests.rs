//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify storage, eviction and statistics properties over
//! arbitrary operation sequences.

use proptest::prelude::*;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_CAPACITY: usize = 100;
const TEST_TTL: u64 = 300;

// == Strategies ==
/// Generates valid cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, hit and miss counters reflect exactly
    // the observed get() outcomes and the entry count matches len().
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(TEST_CAPACITY, TEST_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => store.set(&key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Remove { key } => {
                    store.remove(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "misses mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "total entries mismatch");
    }

    // For any key-value pair, storing then retrieving (before expiry) returns
    // the stored value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::new(TEST_CAPACITY, TEST_TTL);

        store.set(&key, value.clone());
        prop_assert_eq!(store.get(&key), Some(value));
    }

    // For any present key, remove() yields the value and a subsequent get()
    // misses.
    #[test]
    fn prop_remove_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::new(TEST_CAPACITY, TEST_TTL);

        store.set(&key, value.clone());
        prop_assert_eq!(store.remove(&key), Some(value));
        prop_assert_eq!(store.get(&key), None);
        prop_assert_eq!(store.len(), 0);
    }

    // For any key, storing V1 then V2 results in get() returning V2 and a
    // single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = CacheStore::new(TEST_CAPACITY, TEST_TTL);

        store.set(&key, value1);
        store.set(&key, value2.clone());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // For any sequence of set() calls, the entry count never exceeds the
    // configured capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200)
    ) {
        let capacity = 50;
        let mut store = CacheStore::new(capacity, TEST_TTL);

        for (key, value) in entries {
            store.set(&key, value);
            prop_assert!(
                store.len() <= capacity,
                "cache size {} exceeds capacity {}",
                store.len(),
                capacity
            );
        }
    }

    // When a full cache takes a new key, the least recently touched entry is
    // evicted - and since reads do not promote, reading the tail entry first
    // does not shield it.
    #[test]
    fn prop_lru_eviction_order(
        keys in prop::collection::vec(key_strategy(), 3..10),
        new_key in key_strategy(),
        new_value in value_strategy()
    ) {
        let unique_keys: Vec<String> = keys
            .into_iter()
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let mut store = CacheStore::new(capacity, TEST_TTL);

        for key in &unique_keys {
            store.set(key, format!("value_{}", key));
        }
        prop_assert_eq!(store.len(), capacity);

        // a read of the eviction candidate leaves the recency order alone
        let oldest_key = unique_keys[0].clone();
        store.get(&oldest_key);

        store.set(&new_key, new_value);

        prop_assert_eq!(store.len(), capacity);
        prop_assert!(
            store.get(&oldest_key).is_none(),
            "oldest key '{}' should have been evicted despite the read",
            oldest_key
        );
        prop_assert!(store.get(&new_key).is_some(), "new key should exist");

        for key in unique_keys.iter().skip(1) {
            prop_assert!(
                store.get(key).is_some(),
                "key '{}' should still exist (not the oldest)",
                key
            );
        }
    }
}
