//! Cache Store Module
//!
//! Main cache engine combining the key index with the recency order.

use std::borrow::Borrow;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::cache::{CacheStats, Handle, Index, RecencyOrder};
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Fixed-capacity key-value cache with least-recently-used eviction.
///
/// `get` and `put` run in O(1) expected time. A lookup miss is a normal
/// `None`, never an error. Broken internal invariants panic.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    /// Key to handle lookup
    index: Index<K>,
    /// Entry storage ordered MRU to LRU
    order: RecencyOrder<K, V>,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> LruCache<K, V> {
    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Keys ==
    /// Keys from most to least recently used. Does not affect recency.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.order.iter().map(|(_, entry)| &entry.key)
    }

    /// Entries from most to least recently used. Does not affect recency.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|(_, entry)| (&entry.key, &entry.value))
    }

    // == Peek LRU ==
    /// Returns the next eviction candidate without touching it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order
            .back()
            .and_then(|handle| self.order.get(handle))
            .map(|entry| (&entry.key, &entry.value))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.entries = self.order.len();
        stats
    }
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Fails with `InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            index: Index::with_capacity(capacity),
            order: RecencyOrder::with_capacity(capacity),
            stats: CacheStats::new(capacity),
            capacity,
        })
    }

    // == Put ==
    /// Stores a key-value pair and marks it most recently used.
    ///
    /// An existing key has its value replaced in place. A new key arriving
    /// at a full cache first evicts the least recently used entry, which is
    /// returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(handle) = self.index.lookup(&key) {
            match self.order.get_mut(handle) {
                Some(entry) => entry.value = value,
                None => panic!("index points at free slot {}", handle.slot()),
            }
            self.order.move_to_front(handle);
            self.stats.record_update();
            self.check_sizes();
            return None;
        }

        let evicted = if self.order.len() >= self.capacity {
            Some(self.evict_lru())
        } else {
            None
        };

        let handle = self.order.insert_front(key.clone(), value);
        if let Err(err) = self.index.insert(key, handle) {
            panic!("cache invariant violated on insert: {err}");
        }
        self.stats.record_insert();
        self.check_sizes();
        evicted
    }

    // == Get ==
    /// Retrieves a value and marks its key most recently used.
    ///
    /// A miss leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.touch(key)?;
        self.order.get(handle).map(|entry| &entry.value)
    }

    /// Like `get`, but hands out the value mutably.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.touch(key)?;
        self.order.get_mut(handle).map(|entry| &mut entry.value)
    }

    // == Peek ==
    /// Retrieves a value without changing its recency or the counters.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .lookup(key)
            .and_then(|handle| self.order.get(handle))
            .map(|entry| &entry.value)
    }

    /// Checks whether a key is cached without changing its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.lookup(key).is_some()
    }

    // == Remove ==
    /// Removes an entry by key, returning its value. Absent keys are a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        let (_, value) = match self.order.remove(handle) {
            Some(pair) => pair,
            None => panic!("index points at free slot {}", handle.slot()),
        };
        self.stats.record_removals(1);
        self.check_sizes();
        Some(value)
    }

    // == Clear ==
    /// Drops every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.order.len();
        self.index.clear();
        self.order.clear();
        self.stats.record_removals(removed);
        debug!(removed, "cache cleared");
        removed
    }

    // == Validate ==
    /// Walks the whole cache and checks that the index and the recency
    /// order describe the same set of entries.
    pub fn validate(&self) -> Result<()> {
        self.order.validate()?;

        if self.index.len() != self.order.len() {
            return Err(CacheError::Corrupted(format!(
                "index holds {} keys, recency order holds {} entries",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(CacheError::Corrupted(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (handle, entry) in self.order.iter() {
            if self.index.lookup(&entry.key) != Some(handle) {
                return Err(CacheError::Corrupted(format!(
                    "slot {} is not indexed under its own key",
                    handle.slot()
                )));
            }
        }
        Ok(())
    }

    /// Resolves a key and promotes it, recording the hit or miss.
    fn touch<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(handle) = self.index.lookup(key) else {
            self.stats.record_miss();
            trace!("cache miss");
            return None;
        };
        if !self.order.move_to_front(handle) {
            panic!("index points at free slot {}", handle.slot());
        }
        self.stats.record_hit();
        self.check_sizes();
        Some(handle)
    }

    fn evict_lru(&mut self) -> (K, V) {
        let (key, value) = match self.order.evict_back() {
            Ok(pair) => pair,
            Err(err) => panic!("cache invariant violated on eviction: {err}"),
        };
        if self.index.remove(&key).is_none() {
            panic!("cache invariant violated on eviction: evicted key was not indexed");
        }
        self.stats.record_eviction();
        debug!(capacity = self.capacity, "evicted least recently used entry");
        (key, value)
    }

    fn check_sizes(&self) {
        assert_eq!(
            self.index.len(),
            self.order.len(),
            "index and recency order sizes diverged"
        );
        assert!(
            self.order.len() <= self.capacity,
            "cache holds more entries than its capacity"
        );
    }
}
