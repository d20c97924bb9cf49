//! Property-Based Tests for Cache Module
//!
//! Drives `CacheStore` with random operation sequences and checks it
//! against a naive reference model.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, ManualClock};

// == Test Configuration ==
const TEST_TTL_MS: u64 = 60_000;

fn new_store(capacity: usize) -> (CacheStore<u32>, ManualClock) {
    let clock = ManualClock::new(0);
    let store = CacheStore::with_clock(
        capacity,
        Duration::from_millis(TEST_TTL_MS),
        Arc::new(clock.clone()),
    );
    (store, clock)
}

// == Strategies ==
/// Small key space so sequences revisit keys and force evictions
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Delete { key: String },
    Advance { ms: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => (0..=TEST_TTL_MS + 10).prop_map(|ms| CacheOp::Advance { ms }),
    ]
}

// == Reference Model ==
/// Vec ordered least to most recently used, with linear scans.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(String, u32, u64)>,
    capacity: usize,
}

impl Model {
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _, _)| k == key)
    }

    fn get(&mut self, key: &str, now: u64) -> Option<u32> {
        let pos = self.position(key)?;
        let (k, v, touched) = self.entries.remove(pos);
        if now.saturating_sub(touched) > TEST_TTL_MS {
            return None;
        }
        self.entries.push((k, v, now));
        Some(v)
    }

    fn set(&mut self, key: String, value: u32, now: u64) {
        if let Some(pos) = self.position(&key) {
            self.entries.remove(pos);
        } else if self.entries.len() >= self.capacity {
            self.entries.remove(0);
        }
        self.entries.push((key, value, now));
    }

    fn delete(&mut self, key: &str) -> Option<u32> {
        let pos = self.position(key)?;
        Some(self.entries.remove(pos).1)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any interleaving of operations behaves exactly like the reference
    // model: same results, same size, same recency order.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let (mut store, clock) = new_store(capacity);
        let mut model = Model { capacity, ..Model::default() };
        let mut now = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value);
                    model.set(key, value, now);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(&key, now), "get({})", key);
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.delete(&key));
                }
                CacheOp::Advance { ms } => {
                    clock.advance(Duration::from_millis(ms));
                    now += ms;
                }
            }

            prop_assert_eq!(store.len(), model.entries.len());
            let expected: Vec<String> =
                model.entries.iter().rev().map(|(k, _, _)| k.clone()).collect();
            prop_assert_eq!(store.keys_by_recency(), expected);
        }
    }

    // The number of entries never exceeds capacity after any set.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        keys in prop::collection::vec("[a-z]{1,3}", 1..200)
    ) {
        let (mut store, _) = new_store(capacity);

        for (i, key) in keys.into_iter().enumerate() {
            store.set(key, i as u32);
            prop_assert!(
                store.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                store.len(),
                capacity
            );
        }
    }

    // Up to `capacity` distinct keys are all retrievable with their
    // latest value.
    #[test]
    fn prop_within_capacity_everything_retrievable(
        writes in prop::collection::vec((key_strategy(), any::<u32>()), 1..60)
    ) {
        let distinct: HashSet<&String> = writes.iter().map(|(k, _)| k).collect();
        let (mut store, _) = new_store(distinct.len());

        for (key, value) in &writes {
            store.set(key.clone(), *value);
        }

        for key in distinct {
            let latest = writes.iter().rev().find(|(k, _)| k == key).map(|(_, v)| *v);
            prop_assert_eq!(store.get(key), latest);
        }
        prop_assert_eq!(store.stats().evictions, 0);
    }

    // Filling to capacity, touching one key, then inserting a new key
    // evicts the least recently touched entry and nothing else.
    #[test]
    fn prop_lru_eviction_order(
        keys in prop::collection::hash_set("[a-z]{1,6}", 2..10),
        touched_idx in any::<prop::sample::Index>(),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let capacity = keys.len();
        let (mut store, _) = new_store(capacity);

        for (i, key) in keys.iter().enumerate() {
            store.set(key.clone(), i as u32);
        }

        let touched = touched_idx.index(capacity);
        store.get(&keys[touched]);
        let expected_victim = if touched == 0 { 1 } else { 0 };

        store.set("new-key", 999);

        prop_assert_eq!(store.len(), capacity);
        prop_assert_eq!(store.stats().evictions, 1);
        for (i, key) in keys.iter().enumerate() {
            if i == expected_victim {
                prop_assert!(store.get(key).is_none(), "{} should be evicted", key);
            } else {
                prop_assert_eq!(store.get(key), Some(i as u32));
            }
        }
        prop_assert_eq!(store.get("new-key"), Some(999));
    }

    // Overwriting keeps the size and returns the new value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in any::<u32>(),
        value2 in any::<u32>()
    ) {
        let (mut store, _) = new_store(4);

        store.set(key.clone(), value1);
        store.set(key.clone(), value2);

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Past the TTL a key reads as absent; at or before it, present.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in any::<u32>(),
        elapsed in 0u64..(3 * TEST_TTL_MS)
    ) {
        let (mut store, clock) = new_store(8);

        store.set(key.clone(), value);
        clock.advance(Duration::from_millis(elapsed));

        if elapsed > TEST_TTL_MS {
            prop_assert_eq!(store.get(&key), None);
            prop_assert_eq!(store.get(&key), None);
        } else {
            prop_assert_eq!(store.get(&key), Some(value));
        }
    }

    // Statistics agree with what the caller observed.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let (mut store, clock) = new_store(3);
        let mut hits = 0u64;
        let mut misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => store.set(key, value),
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => hits += 1,
                    None => misses += 1,
                },
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
                CacheOp::Advance { ms } => clock.advance(Duration::from_millis(ms)),
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }
}
