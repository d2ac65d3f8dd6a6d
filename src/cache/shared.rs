//! Shared Cache Module
//!
//! Wraps an `LruCache` in a single exclusive lock for use across tasks.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::cache::{CacheStats, LruCache};
use crate::config::Config;
use crate::error::Result;

// == Shared Cache ==
/// Cheaply clonable handle to a lock-guarded cache.
///
/// Every method takes the lock for exactly one cache operation, so the
/// index and the recency order always change together. `get` promotes, so
/// even reads need exclusive access.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> SharedCache<K, V> {
    /// Wraps an existing cache.
    pub fn new(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a shared cache from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(LruCache::new(config.capacity)?))
    }

    /// Locks the cache for a batch of operations.
    ///
    /// Drop the guard before awaiting anything else.
    pub async fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.inner.lock().await
    }

    pub async fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().await.put(key, value)
    }

    /// Returns a copy of the value; a borrow cannot outlive the lock.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.get(key).cloned()
    }

    pub async fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.peek(key).cloned()
    }

    pub async fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.remove(key)
    }

    /// Keys from most to least recently used.
    pub async fn keys(&self) -> Vec<K> {
        self.inner.lock().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    pub async fn capacity(&self) -> usize {
        self.inner.lock().await.capacity()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    pub async fn clear(&self) -> usize {
        self.inner.lock().await.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shared_put_get() {
        let cache = SharedCache::new(LruCache::new(2).unwrap());

        cache.put("a".to_string(), 1).await;
        assert_eq!(cache.get("a").await, Some(1));
        assert_eq!(cache.get("missing").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_shared_clones_see_same_cache() {
        let cache = SharedCache::new(LruCache::new(2).unwrap());
        let other = cache.clone();

        cache.put(1u32, "one".to_string()).await;
        other.put(2u32, "two".to_string()).await;

        assert_eq!(cache.keys().await, vec![2, 1]);
        assert_eq!(other.put(3, "three".to_string()).await, Some((1, "one".to_string())));
        assert_eq!(cache.keys().await, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_shared_concurrent_tasks_keep_invariants() {
        let cache = SharedCache::new(LruCache::new(8).unwrap());

        let mut handles = Vec::new();
        for task in 0..4u32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50u32 {
                    cache.put(task * 100 + i, i).await;
                    cache.get(&(task * 100 + i / 2)).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let guard = cache.lock().await;
        assert_eq!(guard.len(), 8);
        assert!(guard.validate().is_ok());
    }

    #[tokio::test]
    async fn test_shared_from_config() {
        let config = Config {
            capacity: 3,
            ..Config::default()
        };
        let cache: SharedCache<String, String> = SharedCache::from_config(&config).unwrap();
        assert_eq!(cache.capacity().await, 3);
        assert!(cache.is_empty().await);

        let zero = Config {
            capacity: 0,
            ..Config::default()
        };
        assert!(SharedCache::<String, String>::from_config(&zero).is_err());
    }

    #[tokio::test]
    async fn test_shared_remove_and_clear() {
        let cache = SharedCache::new(LruCache::new(4).unwrap());
        cache.put('a', 1).await;
        cache.put('b', 2).await;
        cache.put('c', 3).await;

        assert_eq!(cache.remove(&'b').await, Some(2));
        assert_eq!(cache.peek(&'a').await, Some(1));
        assert_eq!(cache.keys().await, vec!['c', 'a']);
        assert_eq!(cache.clear().await, 2);
        assert_eq!(cache.stats().await.removals, 3);
    }
}
