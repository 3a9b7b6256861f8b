//! Process-local cache tier using DashMap
//!
//! Entries expire after a default TTL and a background task sweeps expired
//! entries on a fixed interval. `get` also evicts lazily, so a hit never
//! returns a stale value even between sweeps. All operations are safe for
//! concurrent use from many request tasks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// In-memory key/value cache holding serialized payloads.
pub struct LocalCache {
    data: Arc<DashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl LocalCache {
    /// Create a cache whose entries live for `default_ttl`, swept every
    /// `purge_interval`. Must be called from within a tokio runtime.
    pub fn new(default_ttl: Duration, purge_interval: Duration) -> Self {
        let cache = Self {
            data: Arc::new(DashMap::new()),
            default_ttl,
        };

        cache.start_purge_task(purge_interval);

        cache
    }

    /// Get a value, evicting it first if it has expired.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.data.get(key).and_then(|entry| {
            if Instant::now() > entry.expires_at {
                drop(entry);
                self.data.remove(key);
                return None;
            }
            Some(entry.value.clone())
        })
    }

    /// Set a value with the default TTL.
    pub fn set(&self, key: String, value: Vec<u8>) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Set a value with an explicit TTL.
    pub fn set_with_ttl(&self, key: String, value: Vec<u8>, ttl: Duration) {
        self.data.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Delete a single key. Deleting an absent key is a no-op.
    pub fn delete(&self, key: &str) {
        self.data.remove(key);
    }

    /// Drop every entry. Flushing an empty cache is a no-op.
    pub fn flush(&self) {
        self.data.clear();
    }

    fn start_purge_task(&self, purge_interval: Duration) {
        let data = self.data.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(purge_interval);
            loop {
                interval.tick().await;

                let now = Instant::now();
                let expired: Vec<String> = data
                    .iter()
                    .filter(|entry| now > entry.expires_at)
                    .map(|entry| entry.key().clone())
                    .collect();

                for key in expired {
                    data.remove(&key);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> LocalCache {
        LocalCache::new(Duration::from_secs(60), Duration::from_secs(60))
    }

    #[tokio::test]
    async fn basic_operations() {
        let cache = cache();

        cache.set("key1".to_string(), vec![1, 2, 3]);
        assert_eq!(cache.get("key1"), Some(vec![1, 2, 3]));

        assert_eq!(cache.get("nonexistent"), None);

        cache.delete("key1");
        assert_eq!(cache.get("key1"), None);
    }

    #[tokio::test]
    async fn entries_expire() {
        let cache = cache();

        cache.set_with_ttl("key1".to_string(), vec![1, 2, 3], Duration::from_millis(10));
        assert_eq!(cache.get("key1"), Some(vec![1, 2, 3]));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.get("key1"), None);
    }

    #[tokio::test]
    async fn flush_drops_everything_and_is_idempotent() {
        let cache = cache();

        cache.set("a".to_string(), vec![1]);
        cache.set("b".to_string(), vec![2]);

        cache.flush();
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);

        // Flushing an already-empty cache must not fail.
        cache.flush();
    }
}
