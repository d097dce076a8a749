//! Bounded action cache keyed by exact query string.
//!
//! Entries are derived deterministically from backend state within their
//! validity window, so concurrent misses on the same key may race to
//! populate the cache; last-writer-wins is acceptable and no in-flight
//! de-duplication is attempted.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::RwLock;

use crate::orchestrator::Action;

/// Cached action wrapper with expiration tracking.
#[derive(Debug, Clone)]
struct CachedAction {
    action: Action,
    cached_at: Instant,
    ttl: Duration,
}

impl CachedAction {
    fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl
    }
}

/// Cache counters for monitoring.
#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    /// Total cache hits.
    pub hits: u64,
    /// Total cache misses.
    pub misses: u64,
    /// Expired entries encountered on lookup.
    pub expired: u64,
    /// Total inserts performed.
    pub inserts: u64,
}

impl CacheMetrics {
    /// Calculate the cache hit ratio.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache mapping a query to its resolved action.
pub struct ActionCache {
    entries: RwLock<LruCache<String, CachedAction>>,
    ttl: Duration,
    metrics: RwLock<CacheMetrics>,
}

impl ActionCache {
    /// Create a cache holding at most `capacity` queries.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap()),
            )),
            ttl,
            metrics: RwLock::new(CacheMetrics::default()),
        }
    }

    /// Look up the cached action for a query, dropping expired entries.
    pub async fn get(&self, query: &str) -> Option<Action> {
        let mut entries = self.entries.write().await;
        match entries.get(query) {
            Some(cached) if !cached.is_expired() => {
                let action = cached.action.clone();
                drop(entries);
                self.metrics.write().await.hits += 1;
                Some(action)
            }
            Some(_) => {
                entries.pop(query);
                drop(entries);
                let mut metrics = self.metrics.write().await;
                metrics.expired += 1;
                metrics.misses += 1;
                None
            }
            None => {
                drop(entries);
                self.metrics.write().await.misses += 1;
                None
            }
        }
    }

    /// Insert an action for a query. Overwrites any racing insert.
    pub async fn put(&self, query: &str, action: Action) {
        let cached = CachedAction {
            action,
            cached_at: Instant::now(),
            ttl: self.ttl,
        };
        self.entries.write().await.put(query.to_string(), cached);
        self.metrics.write().await.inserts += 1;
    }

    /// Current number of cached queries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Snapshot of the cache counters.
    pub async fn metrics(&self) -> CacheMetrics {
        self.metrics.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = ActionCache::new(4, Duration::from_secs(60));
        assert_eq!(cache.get("@a").await, None);

        cache.put("@a", Action::Redirect("10.0.0.1".to_string())).await;
        assert_eq!(
            cache.get("@a").await,
            Some(Action::Redirect("10.0.0.1".to_string()))
        );

        let metrics = cache.metrics().await;
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 1);
        assert!((metrics.hit_ratio() - 0.5).abs() < 0.001);
    }

    #[tokio::test]
    async fn expired_entries_are_dropped() {
        let cache = ActionCache::new(4, Duration::from_millis(10));
        cache.put("@a", Action::ExplorerRedirect("@a".to_string())).await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("@a").await, None);
        assert_eq!(cache.metrics().await.expired, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn capacity_is_bounded() {
        let cache = ActionCache::new(2, Duration::from_secs(60));
        cache.put("@a", Action::Redirect("a".to_string())).await;
        cache.put("@b", Action::Redirect("b".to_string())).await;
        cache.put("@c", Action::Redirect("c".to_string())).await;

        assert_eq!(cache.len().await, 2);
        // Least recently used entry was evicted.
        assert_eq!(cache.get("@a").await, None);
    }
}
