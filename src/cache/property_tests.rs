//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check region bookkeeping and all-region invalidation over
//! random operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::{CachedValue, Region, RegionStore, ResponseCache};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 16;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Small key space so that gets, overwrites and evictions all happen
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e][0-9]{0,1}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = CachedValue> {
    prop_oneof![
        any::<u32>().prop_map(CachedValue::Salary),
        prop::collection::vec("[a-z]{1,8}", 1..4).prop_map(CachedValue::Names),
    ]
}

fn region_strategy() -> impl Strategy<Value = Region> {
    prop::sample::select(Region::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum RegionOp {
    Insert { key: String, value: CachedValue },
    Get { key: String },
    Remove { key: String },
}

fn region_op_strategy() -> impl Strategy<Value = RegionOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| RegionOp::Insert { key, value }),
        key_strategy().prop_map(|key| RegionOp::Get { key }),
        key_strategy().prop_map(|key| RegionOp::Remove { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hits, misses and entry count always agree with what actually happened.
    #[test]
    fn prop_region_statistics_accuracy(ops in prop::collection::vec(region_op_strategy(), 1..60)) {
        let mut store = RegionStore::new(TEST_MAX_ENTRIES, TEST_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                RegionOp::Insert { key, value } => store.insert(&key, value),
                RegionOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                RegionOp::Remove { key } => {
                    store.remove(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // A region never holds more than its capacity, and evictions account for
    // every distinct key that no longer fits.
    #[test]
    fn prop_region_capacity_bound(
        capacity in 1usize..8,
        keys in prop::collection::vec(key_strategy(), 1..80)
    ) {
        let mut store = RegionStore::new(capacity, TEST_TTL);
        let mut distinct = HashSet::new();

        for key in &keys {
            store.insert(key, CachedValue::Salary(1));
            distinct.insert(key.clone());
            prop_assert!(store.len() <= capacity);
        }

        let expected_len = distinct.len().min(capacity);
        prop_assert_eq!(store.len(), expected_len);
        prop_assert!(store.stats().evictions >= (distinct.len() - expected_len) as u64);
    }

    // The most recently inserted key always survives eviction.
    #[test]
    fn prop_latest_insert_is_retained(keys in prop::collection::vec(key_strategy(), 1..40)) {
        let mut store = RegionStore::new(3, TEST_TTL);
        for (i, key) in keys.iter().enumerate() {
            store.insert(key, CachedValue::Salary(i as u32));
        }

        let last = keys.len() - 1;
        prop_assert_eq!(store.get(&keys[last]), Some(CachedValue::Salary(last as u32)));
    }

    // After invalidation no region holds anything, whatever was cached before.
    #[test]
    fn prop_invalidate_clears_every_region(
        writes in prop::collection::vec((region_strategy(), key_strategy(), 1u32..1000), 1..30)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();

        runtime.block_on(async {
            let cache = ResponseCache::new(TEST_MAX_ENTRIES, TEST_TTL);
            for (region, key, salary) in writes {
                cache
                    .get_or_compute(region, &key, false, || async move { Ok(salary) })
                    .await
                    .unwrap();
            }
            assert!(!cache.is_empty().await);

            cache.invalidate_all().await;

            assert!(cache.is_empty().await);
            for region in Region::ALL {
                assert_eq!(cache.len(region).await, 0);
            }
            assert_eq!(cache.snapshot().await.invalidations, 1);
        });
    }
}
