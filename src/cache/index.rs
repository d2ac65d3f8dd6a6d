//! Cache Index Module
//!
//! Maps keys to the arena handles of their entries.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::entry::Handle;
use crate::error::{CacheError, Result};

// == Index ==
/// Key lookup table. Holds handles only; entries live in the recency order.
#[derive(Debug, Clone)]
pub struct Index<K> {
    handles: HashMap<K, Handle>,
}

impl<K: Hash + Eq> Default for Index<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq> Index<K> {
    // == Constructor ==
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: HashMap::with_capacity(capacity),
        }
    }

    // == Lookup ==
    /// Returns the handle for a key, or None on a miss.
    pub fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.handles.get(key).copied()
    }

    // == Insert ==
    /// Associates a new key with a handle.
    ///
    /// Fails with `DuplicateKey` if the key is already indexed; the existing
    /// association is kept.
    pub fn insert(&mut self, key: K, handle: Handle) -> Result<()> {
        if self.handles.contains_key(&key) {
            return Err(CacheError::DuplicateKey);
        }
        self.handles.insert(key, handle);
        Ok(())
    }

    // == Remove ==
    /// Drops a key's association. Absent keys are ignored.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.handles.remove(key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lookup_miss() {
        let index: Index<String> = Index::new();
        assert!(index.lookup("missing").is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn test_index_insert_and_lookup() {
        let mut index = Index::new();
        index.insert("key1".to_string(), Handle::new(0)).unwrap();
        index.insert("key2".to_string(), Handle::new(1)).unwrap();

        assert_eq!(index.lookup("key1"), Some(Handle::new(0)));
        assert_eq!(index.lookup("key2"), Some(Handle::new(1)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_index_duplicate_key_keeps_original() {
        let mut index = Index::new();
        index.insert(7u64, Handle::new(0)).unwrap();

        let result = index.insert(7u64, Handle::new(9));
        assert_eq!(result, Err(CacheError::DuplicateKey));
        assert_eq!(index.lookup(&7), Some(Handle::new(0)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_index_remove_is_idempotent() {
        let mut index = Index::new();
        index.insert(1u32, Handle::new(4)).unwrap();

        assert_eq!(index.remove(&1), Some(Handle::new(4)));
        assert_eq!(index.remove(&1), None);
        assert!(index.is_empty());
    }

    #[test]
    fn test_index_clear() {
        let mut index = Index::new();
        index.insert('a', Handle::new(0)).unwrap();
        index.insert('b', Handle::new(1)).unwrap();

        index.clear();
        assert!(index.is_empty());
        assert!(index.lookup(&'a').is_none());
    }
}
