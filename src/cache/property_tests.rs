//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a naive reference model.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::LruCache;

// == Reference Model ==
/// Vec-backed LRU: index 0 is most recently used. O(n), obviously correct.
#[derive(Debug, Default)]
struct ModelLru {
    capacity: usize,
    entries: Vec<(u8, u32)>,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn put(&mut self, key: u8, value: u32) -> Option<(u8, u32)> {
        if let Some(pos) = self.position(key) {
            self.entries.remove(pos);
            self.entries.insert(0, (key, value));
            return None;
        }
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop()
        } else {
            None
        };
        self.entries.insert(0, (key, value));
        evicted
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(entry.1)
    }

    fn remove(&mut self, key: u8) -> Option<u32> {
        let pos = self.position(key)?;
        Some(self.entries.remove(pos).1)
    }

    fn keys(&self) -> Vec<u8> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }
}

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: u8, value: u32 },
    Get { key: u8 },
    Peek { key: u8 },
    Remove { key: u8 },
}

/// Small key space so hits, updates and evictions all happen often.
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..24
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Peek { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every operation returns what the model returns, and afterwards the
    // recency order, size bound and internal consistency all agree.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..10,
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        let mut cache = LruCache::new(capacity).unwrap();
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    prop_assert_eq!(cache.put(key, value), model.put(key, value));
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                }
                CacheOp::Peek { key } => {
                    let expected = model.position(key).map(|pos| model.entries[pos].1);
                    prop_assert_eq!(cache.peek(&key).copied(), expected);
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(cache.remove(&key), model.remove(key));
                }
            }

            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), model.keys());
            prop_assert!(cache.validate().is_ok(), "{:?}", cache.validate());
        }
    }

    // Inserting capacity + 1 distinct keys leaves exactly the newest
    // `capacity` keys; the first key is gone.
    #[test]
    fn prop_overflow_evicts_oldest(
        keys in prop::collection::hash_set(any::<u32>(), 2..40)
    ) {
        let keys: Vec<u32> = keys.into_iter().collect();
        let capacity = keys.len() - 1;
        let mut cache = LruCache::new(capacity).unwrap();

        for key in &keys {
            cache.put(*key, key.wrapping_mul(3));
        }

        prop_assert_eq!(cache.len(), capacity);
        prop_assert!(!cache.contains(&keys[0]));
        let present: HashSet<u32> = cache.keys().copied().collect();
        let expected: HashSet<u32> = keys[1..].iter().copied().collect();
        prop_assert_eq!(present, expected);
    }

    // A miss changes neither the size nor the recency order.
    #[test]
    fn prop_miss_is_noop(
        keys in prop::collection::vec(0u16..100, 1..30),
        probe in 100u16..200
    ) {
        let mut cache = LruCache::new(16).unwrap();
        for key in &keys {
            cache.put(*key, ());
        }
        let before: Vec<u16> = cache.keys().copied().collect();
        let len = cache.len();

        prop_assert!(cache.get(&probe).is_none());

        prop_assert_eq!(cache.len(), len);
        prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), before);
    }

    // A hit keeps the size and moves the key to the front.
    #[test]
    fn prop_hit_moves_to_front(
        keys in prop::collection::vec(0u16..50, 1..30),
        pick in any::<prop::sample::Index>()
    ) {
        let mut cache = LruCache::new(64).unwrap();
        for key in &keys {
            cache.put(*key, *key as u64);
        }
        let target = keys[pick.index(keys.len())];
        let len = cache.len();

        prop_assert_eq!(cache.get(&target), Some(&(target as u64)));

        prop_assert_eq!(cache.len(), len);
        prop_assert_eq!(cache.keys().next(), Some(&target));
    }

    // put-then-get returns the stored value and overwrites never evict.
    #[test]
    fn prop_overwrite_round_trip(
        capacity in 1usize..8,
        key in any::<u8>(),
        first in any::<u32>(),
        second in any::<u32>()
    ) {
        let mut cache = LruCache::new(capacity).unwrap();
        for filler in 0..capacity as u32 {
            cache.put(u8::MAX - 1 - (filler as u8 % 200), filler);
        }
        cache.put(key, first);
        prop_assert_eq!(cache.get(&key), Some(&first));

        let len = cache.len();
        prop_assert_eq!(cache.put(key, second), None);
        prop_assert_eq!(cache.len(), len);
        prop_assert_eq!(cache.get(&key), Some(&second));
    }
}
