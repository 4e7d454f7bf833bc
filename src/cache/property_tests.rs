//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's TTL and invalidation guarantees.
//! Time is passed explicitly through the `*_at` operations, so expiry cases
//! need no sleeping.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::cache::CacheStore;

// == Test Configuration ==
const T0: u64 = 1_700_000_000_000;

// == Strategies ==
/// Generates cache keys, optionally under a directory namespace
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9-]{1,24}".prop_map(|s| format!("business:{}", s)),
        "[a-z0-9 ]{0,16}".prop_map(|s| format!("search:{}:{{}}", s)),
        Just("categories".to_string()),
    ]
}

/// Generates cache values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

/// Generates TTLs from zero to one hour
fn ttl_strategy() -> impl Strategy<Value = u64> {
    0u64..3_600_000
}

/// A sequence of cache operations with a monotonically advancing clock
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, ttl: u64 },
    Get { key: String },
    Invalidate { pattern: Option<String> },
    Cleanup,
    Advance { ms: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy(), 0u64..5_000)
            .prop_map(|(key, value, ttl)| CacheOp::Set { key, value, ttl }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => prop::option::of(prop_oneof![
                Just("business".to_string()),
                Just("search".to_string()),
                "[a-z]{1,3}",
            ])
            .prop_map(|pattern| CacheOp::Invalidate { pattern }),
        1 => Just(CacheOp::Cleanup),
        2 => (0u64..3_000).prop_map(|ms| CacheOp::Advance { ms }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Immediately after set, get returns the stored value.
    #[test]
    fn prop_set_then_get(key in key_strategy(), value in value_strategy(), ttl in ttl_strategy()) {
        let mut store = CacheStore::new();

        store.set_at(key.clone(), value.clone(), ttl, T0);

        prop_assert_eq!(store.get_at(&key, T0), Some(value));
    }

    // Once more than ttl has elapsed, get is absent and the entry is gone.
    #[test]
    fn prop_expired_reads_absent(
        key in key_strategy(),
        value in value_strategy(),
        ttl in ttl_strategy(),
        extra in 1u64..1_000_000
    ) {
        let mut store = CacheStore::new();

        store.set_at(key.clone(), value, ttl, T0);

        prop_assert_eq!(store.get_at(&key, T0 + ttl + extra), None);
        prop_assert!(store.is_empty(), "Stale entry should be lazily removed");
    }

    // The second of two sets under one key wins.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy(),
        ttl in ttl_strategy()
    ) {
        let mut store = CacheStore::new();

        store.set_at(key.clone(), value1, ttl, T0);
        store.set_at(key.clone(), value2.clone(), ttl, T0);

        prop_assert_eq!(store.get_at(&key, T0), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Invalidating without a pattern empties the store.
    #[test]
    fn prop_invalidate_all(keys in prop::collection::vec(key_strategy(), 0..30)) {
        let mut store = CacheStore::new();
        for key in &keys {
            store.set_at(key.clone(), 0u8, 60_000, T0);
        }

        store.invalidate(None);

        prop_assert!(store.is_empty());
        for key in &keys {
            prop_assert_eq!(store.get_at(key, T0), None);
        }
    }

    // A pattern removes exactly the keys containing it.
    #[test]
    fn prop_invalidate_pattern_exact(
        keys in prop::collection::vec(key_strategy(), 0..30),
        pattern in prop_oneof![Just("business".to_string()), Just("search".to_string()), "[a-z0-9:]{1,4}"]
    ) {
        let mut store = CacheStore::new();
        for key in &keys {
            store.set_at(key.clone(), key.clone(), 60_000, T0);
        }
        let distinct: std::collections::HashSet<_> = keys.iter().cloned().collect();
        let expected_removed = distinct.iter().filter(|k| k.contains(&pattern)).count();

        let removed = store.invalidate(Some(&pattern));

        prop_assert_eq!(removed, expected_removed);
        for key in &distinct {
            if key.contains(&pattern) {
                prop_assert_eq!(store.get_at(key, T0), None);
            } else {
                prop_assert_eq!(store.get_at(key, T0), Some(key.clone()));
            }
        }
    }

    // Cleanup removes exactly the stale entries and reports how many.
    #[test]
    fn prop_cleanup_exact_count(
        entries in prop::collection::hash_map(key_strategy(), ttl_strategy(), 0..30),
        elapsed in 0u64..3_600_000
    ) {
        let mut store = CacheStore::new();
        for (key, ttl) in &entries {
            store.set_at(key.clone(), *ttl, *ttl, T0);
        }
        let now = T0 + elapsed;
        let expected_stale = entries.values().filter(|ttl| elapsed > **ttl).count();

        let removed = store.cleanup_at(now);

        prop_assert_eq!(removed, expected_stale);
        prop_assert_eq!(store.len(), entries.len() - expected_stale);
        for (key, ttl) in &entries {
            if elapsed <= *ttl {
                prop_assert_eq!(store.get_at(key, now), Some(*ttl));
            }
        }
    }

    // Against a reference model: reads never return stale data, and the
    // stats partition always adds up.
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = CacheStore::new();
        let mut model: HashMap<String, (String, u64, u64)> = HashMap::new();
        let mut now = T0;

        for op in ops {
            match op {
                CacheOp::Set { key, value, ttl } => {
                    store.set_at(key.clone(), value.clone(), ttl, now);
                    model.insert(key, (value, now, ttl));
                }
                CacheOp::Get { key } => {
                    let expected = model
                        .get(&key)
                        .filter(|(_, created, ttl)| now - created <= *ttl)
                        .map(|(value, _, _)| value.clone());
                    if expected.is_none() {
                        model.remove(&key);
                    }
                    prop_assert_eq!(store.get_at(&key, now), expected);
                }
                CacheOp::Invalidate { pattern } => {
                    match &pattern {
                        None => model.clear(),
                        Some(p) => model.retain(|k, _| !k.contains(p.as_str())),
                    }
                    store.invalidate(pattern.as_deref());
                }
                CacheOp::Cleanup => {
                    let before = model.len();
                    model.retain(|_, (_, created, ttl)| now - *created <= *ttl);
                    prop_assert_eq!(store.cleanup_at(now), before - model.len());
                }
                CacheOp::Advance { ms } => now += ms,
            }

            let stats = store.stats_at(now);
            prop_assert_eq!(stats.active_entries + stats.expired_entries, stats.total_entries);
            prop_assert_eq!(stats.total_entries, model.len());
        }
    }
}
