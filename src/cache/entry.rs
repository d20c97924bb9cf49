//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// A stored value plus the time it was last touched.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Last read or write (clock milliseconds)
    pub last_touch: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry touched at `now_ms`.
    pub fn new(value: V, now_ms: u64) -> Self {
        Self {
            value,
            last_touch: now_ms,
        }
    }

    // == Touch ==
    /// Refreshes the recency marker.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_touch = now_ms;
    }

    // == Is Expired ==
    /// Checks whether more than `ttl_ms` has passed since the last touch.
    ///
    /// Boundary condition: an entry touched exactly `ttl_ms` ago is still
    /// live; it expires one millisecond later.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_touch) > ttl_ms
    }
}
