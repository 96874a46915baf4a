//! Generic in-memory cache with TTL support.
//!
//! Entries expire `ttl` after insertion. Expired entries are evicted lazily
//! by `get`, explicitly by `invalidate`/`clear`, or in bulk by `cleanup`,
//! which is intended to run on a fixed interval independent of request
//! traffic. Every operation completes synchronously under a single lock, so
//! operations never interleave with each other.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    timestamp: Instant,
    expires_at: Instant,
}

/// Derived view of one entry's freshness. Computing it never evicts, so a
/// caller may inspect a stale entry's age before deciding to drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetadata {
    pub age: Duration,
    pub remaining: Duration,
    pub is_expired: bool,
}

#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Get stored data if present and unexpired. An expired entry is removed
    /// and `None` returned.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock();
        let now = Instant::now();
        let expired = entries.get(key).map(|entry| now >= entry.expires_at)?;

        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.data.clone())
    }

    /// Insert or replace the entry for `key`. The previous entry, if any, is
    /// replaced wholesale.
    pub fn set(&self, key: impl Into<String>, data: T) {
        let now = Instant::now();
        self.entries.lock().insert(
            key.into(),
            CacheEntry {
                data,
                timestamp: now,
                expires_at: now + self.ttl,
            },
        );
    }

    /// True iff `get` would return data for `key`.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove the entry for `key`. A no-op for absent keys.
    pub fn invalidate(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Freshness of the entry for `key`, without evicting it.
    pub fn metadata(&self, key: &str) -> Option<CacheMetadata> {
        let entries = self.entries.lock();
        entries.get(key).map(|entry| {
            let now = Instant::now();
            CacheMetadata {
                age: now.saturating_duration_since(entry.timestamp),
                remaining: entry.expires_at.saturating_duration_since(now),
                is_expired: now >= entry.expires_at,
            }
        })
    }

    /// Remove every currently-expired entry, returning the removed count.
    pub fn cleanup(&self) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        let now = Instant::now();
        entries.retain(|_, entry| now < entry.expires_at);
        before - entries.len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Format an entry age for display, e.g. "2m 30s ago".
pub fn format_age(age: Duration) -> String {
    let seconds = age.as_secs();
    let minutes = seconds / 60;

    if minutes > 0 {
        format!("{}m {}s ago", minutes, seconds % 60)
    } else {
        format!("{}s ago", seconds)
    }
}

/// Format remaining entry lifetime for display, e.g. "2m 30s".
pub fn format_remaining(remaining: Duration) -> String {
    let seconds = remaining.as_secs();
    let minutes = seconds / 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use std::thread::sleep;

    const SHORT_TTL: Duration = Duration::from_millis(30);

    #[test]
    fn test_get_returns_stored_value() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1);
        assert_eq!(cache.get("a"), Some(1));
    }

    #[test]
    fn test_missing_key() {
        let cache: TtlCache<i32> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("nope"), None);
        assert!(!cache.has("nope"));
    }

    #[test]
    fn test_expired_entry_evicted_on_get() {
        let cache = TtlCache::new(SHORT_TTL);
        cache.set("a", 1);
        assert_eq!(cache.len(), 1);

        sleep(SHORT_TTL + Duration::from_millis(20));

        // Lazy eviction: the miss also removes the entry
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_value_survives_until_expiry() {
        let cache = TtlCache::new(Duration::from_millis(200));
        cache.set("a", "fresh");
        assert_eq!(cache.get("a"), Some("fresh"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_replaces_entry_wholesale() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1);
        cache.set("a", 2);
        assert_eq!(cache.get("a"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_is_idempotent() {
        let cache = TtlCache::new(Duration::from_secs(60));

        // Absent key is a no-op
        cache.invalidate("a");

        cache.set("a", 1);
        cache.invalidate("a");
        assert_eq!(cache.get("a"), None);

        // Invalidating twice has the same effect as once
        cache.invalidate("a");
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_clear() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1);
        cache.set("b", 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_metadata_does_not_evict() {
        let cache = TtlCache::new(SHORT_TTL);
        cache.set("a", 1);

        sleep(SHORT_TTL + Duration::from_millis(20));

        let meta = cache.metadata("a").unwrap();
        assert!(meta.is_expired);
        assert_eq!(meta.remaining, Duration::ZERO);
        assert!(meta.age >= SHORT_TTL);

        // The stale entry is still there until someone evicts it
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_metadata_for_fresh_entry() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1);

        let meta = cache.metadata("a").unwrap();
        assert!(!meta.is_expired);
        assert!(meta.remaining <= Duration::from_secs(60));
        assert!(meta.remaining > Duration::from_secs(59));

        assert_eq!(cache.metadata("nope"), None);
    }

    #[test]
    fn test_cleanup_removes_only_expired() {
        let cache = TtlCache::new(SHORT_TTL);
        cache.set("a", 1);
        cache.set("b", 2);

        sleep(SHORT_TTL + Duration::from_millis(20));
        cache.set("c", 3);

        assert_eq!(cache.cleanup(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("c"), Some(3));

        // Nothing left to remove
        assert_eq!(cache.cleanup(), 0);
    }

    #[test]
    fn test_keys_and_size() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.set("a", 1);
        cache.set("b", 2);

        let mut keys = cache.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::from_secs(45)), "45s ago");
        assert_eq!(format_age(Duration::from_secs(150)), "2m 30s ago");
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::from_secs(45)), "45s");
        assert_eq!(format_remaining(Duration::from_secs(150)), "2m 30s");
    }
}
