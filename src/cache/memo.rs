//! Bounded in-process memoization for fetch results
//!
//! A small LRU map keyed by the exact argument tuple of a fetch call.
//! Entries never expire on their own; only capacity eviction removes them,
//! so a memoized value (including a memoized failure) is served for the
//! process lifetime unless the cache is cleared explicitly.

use lru::LruCache;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;

/// Default capacity: distinct argument tuples remembered per process
pub const DEFAULT_MEMO_CAPACITY: usize = 100;

/// LRU memoization cache safe to share across async tasks
pub struct MemoCache<K: Hash + Eq, V: Clone> {
    entries: Mutex<LruCache<K, V>>,
}

impl<K: Hash + Eq, V: Clone> fmt::Debug for MemoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache").finish_non_exhaustive()
    }
}

impl<K: Hash + Eq, V: Clone> MemoCache<K, V> {
    /// Creates a cache holding at most `capacity` entries
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).expect("memo capacity must be non-zero");
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns a clone of the memoized value for `key`, refreshing its recency
    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Memoizes `value` under `key`, evicting the least-recently-used
    /// entry when at capacity
    pub async fn put(&self, key: K, value: V) {
        self.entries.lock().await.put(key, value);
    }

    /// Drops every memoized entry
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    /// Number of entries currently memoized
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache is empty
    #[allow(dead_code)]
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl<K: Hash + Eq, V: Clone> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_MEMO_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_none_for_missing_key() {
        let memo: MemoCache<String, i32> = MemoCache::default();
        assert!(memo.get(&"missing".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let memo: MemoCache<String, i32> = MemoCache::default();
        memo.put("key".to_string(), 42).await;
        assert_eq!(memo.get(&"key".to_string()).await, Some(42));
    }

    #[tokio::test]
    async fn test_memoized_none_is_distinguishable_from_absent() {
        // Values of Option type memoize failures too
        let memo: MemoCache<String, Option<i32>> = MemoCache::default();
        memo.put("failed".to_string(), None).await;

        assert_eq!(memo.get(&"failed".to_string()).await, Some(None));
        assert_eq!(memo.get(&"never_called".to_string()).await, None);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let memo: MemoCache<u32, u32> = MemoCache::new(2);
        memo.put(1, 10).await;
        memo.put(2, 20).await;

        // Touch 1 so 2 becomes least recently used
        memo.get(&1).await;
        memo.put(3, 30).await;

        assert_eq!(memo.get(&1).await, Some(10));
        assert_eq!(memo.get(&2).await, None, "LRU entry should be evicted");
        assert_eq!(memo.get(&3).await, Some(30));
        assert_eq!(memo.len().await, 2);
    }

    #[tokio::test]
    async fn test_clear_empties_the_cache() {
        let memo: MemoCache<u32, u32> = MemoCache::new(4);
        memo.put(1, 1).await;
        memo.put(2, 2).await;

        memo.clear().await;

        assert!(memo.is_empty().await);
        assert_eq!(memo.get(&1).await, None);
    }
}
