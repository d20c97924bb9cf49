//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::clock::to_millis;
use crate::cache::{CacheEntry, CacheStats, Clock, LruTracker, SystemClock};

// == Cache Store ==
/// Bounded cache with LRU eviction and lazy TTL expiry.
///
/// Both `get` hits and `set` count as a touch: they refresh the entry's
/// timestamp and move it to the most recently used position. Expired
/// entries are only noticed on `get` (or an explicit [`purge_expired`]).
///
/// [`purge_expired`]: CacheStore::purge_expired
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore on the system clock.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock::new()))
    }

    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            lru: LruTracker::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
            ttl_ms: to_millis(ttl),
            clock,
        }
    }

    // == Get ==
    /// Returns a clone of the value if present and not expired.
    ///
    /// A hit refreshes the entry's recency. An expired entry is removed
    /// and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            debug!(key, "cache miss");
            return None;
        };

        if entry.is_expired(now, self.ttl_ms) {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            debug!(key, "cache entry expired");
            return None;
        }

        entry.touch(now);
        let value = entry.value.clone();
        self.lru.touch(key);
        self.stats.record_hit();
        Some(value)
    }

    // == Set ==
    /// Stores a value, replacing any previous one for the key.
    ///
    /// If the key is new and the cache is full, the least recently used
    /// entry is evicted first.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = self.clock.now_ms();

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.touch(now);
            self.lru.touch(&key);
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }

        self.lru.touch(&key);
        self.entries.insert(key, CacheEntry::new(value, now));
    }

    // == Delete ==
    /// Removes an entry, returning its value if it was stored.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        Some(entry.value)
    }

    // == Contains ==
    /// Whether a live entry exists, without touching it.
    pub fn contains(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now, self.ttl_ms))
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms;
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, ttl_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Keys from most to least recently used, expired ones included.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lru.iter().map(str::to_string).collect()
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}
