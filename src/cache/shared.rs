//! Shared Cache Module
//!
//! Thread-safe handle around [`CacheStore`] for concurrent lookups.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::cache::{CacheStats, CacheStore, Clock};

// == Shared Cache ==
/// Cloneable handle to one cache shared by concurrent tasks.
///
/// Every operation runs under a single mutex and never awaits.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: Arc<Mutex<CacheStore<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    /// Creates a shared cache on the system clock.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::from_store(CacheStore::new(capacity, ttl))
    }

    /// Creates a shared cache reading time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self::from_store(CacheStore::with_clock(capacity, ttl, clock))
    }

    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().get(key)
    }

    pub fn set(&self, key: impl Into<String>, value: V) {
        self.lock().set(key, value)
    }

    pub fn delete(&self, key: &str) -> Option<V> {
        self.lock().delete(key)
    }

    pub fn purge_expired(&self) -> usize {
        self.lock().purge_expired()
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    // Map and list edits complete before any operation returns, so a
    // poisoned store is still consistent.
    fn lock(&self) -> MutexGuard<'_, CacheStore<V>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let cache = SharedCache::new(10, Duration::from_secs(60));
        let other = cache.clone();

        cache.set("a", 1);
        assert_eq!(other.get("a"), Some(1));
        assert_eq!(other.delete("a"), Some(1));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_inserts_respect_capacity() {
        let cache = SharedCache::new(16, Duration::from_secs(60));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        cache.set(format!("t{}-{}", t, i), i);
                        let _ = cache.get(&format!("t{}-{}", t, i / 2));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 16);
        let stats = cache.stats();
        assert_eq!(stats.evictions, 8 * 200 - 16);
    }

    #[tokio::test]
    async fn test_concurrent_tasks_distinct_keys() {
        let cache = SharedCache::new(100, Duration::from_secs(60));

        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache.set(format!("product-{}", i), i);
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(cache.len(), 50);
        for i in 0..50 {
            assert_eq!(cache.get(&format!("product-{}", i)), Some(i));
        }
    }

    #[test]
    fn test_purge_through_handle() {
        let clock = ManualClock::new(0);
        let cache = SharedCache::with_clock(4, Duration::from_secs(1), Arc::new(clock.clone()));

        cache.set("a", 1);
        clock.advance(Duration::from_millis(1_001));

        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 4);
    }
}
