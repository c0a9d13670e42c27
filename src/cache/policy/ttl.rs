//! TTL Policy Module
//!
//! Time-to-live expiry. Capacity eviction falls back to LRU order, which
//! only writes refresh; reads leave the recency position alone.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::policy::LruPolicy;
use crate::cache::CacheKey;

// == TTL Policy ==
#[derive(Debug)]
pub struct TtlPolicy<K> {
    recency: LruPolicy<K>,
    /// Absolute expiry per key, on the cache clock's timeline
    expiry: HashMap<K, Duration>,
}

impl<K: CacheKey> TtlPolicy<K> {
    pub fn new() -> Self {
        Self {
            recency: LruPolicy::new(),
            expiry: HashMap::new(),
        }
    }

    // == On Write ==
    /// Records a write of `key`, new or existing.
    ///
    /// Moves the key to the front of the recency order and resets its
    /// expiry to `expires_at`.
    pub fn on_write(&mut self, key: &K, expires_at: Duration) {
        if self.recency.contains(key) {
            self.recency.on_access(key);
        } else {
            self.recency.on_new_key(key);
        }
        self.expiry.insert(key.clone(), expires_at);
    }

    // == Evict ==
    pub fn evict(&mut self) -> Option<K> {
        let key = self.recency.evict()?;
        self.expiry.remove(&key);
        Some(key)
    }

    // == Remove ==
    pub fn remove(&mut self, key: &K) {
        self.recency.remove(key);
        self.expiry.remove(key);
    }

    // == Is Expired ==
    /// An entry is expired once `now` reaches its expiry instant.
    pub fn is_expired(&self, key: &K, now: Duration) -> bool {
        self.expiry
            .get(key)
            .map(|&expires_at| now >= expires_at)
            .unwrap_or(false)
    }

    /// Time left before `key` expires; zero if already expired.
    pub fn remaining(&self, key: &K, now: Duration) -> Option<Duration> {
        self.expiry
            .get(key)
            .map(|&expires_at| expires_at.saturating_sub(now))
    }

    /// All keys expired as of `now`.
    pub fn expired_keys(&self, now: Duration) -> Vec<K> {
        self.expiry
            .iter()
            .filter(|(_, expires_at)| now >= **expires_at)
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn peek_victim(&self) -> Option<&K> {
        self.recency.peek_victim()
    }

    pub fn len(&self) -> usize {
        self.recency.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.recency.contains(key) && self.expiry.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.recency.clear();
        self.expiry.clear();
    }

    #[cfg(test)]
    pub(crate) fn expiry_len(&self) -> usize {
        self.expiry.len()
    }
}

impl<K: CacheKey> Default for TtlPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_ttl_expiry_boundary() {
        let mut ttl = TtlPolicy::new();
        ttl.on_write(&"a", SECOND);

        assert!(!ttl.is_expired(&"a", Duration::from_millis(999)));
        assert!(ttl.is_expired(&"a", SECOND));
        assert!(!ttl.is_expired(&"missing", SECOND * 10));
    }

    #[test]
    fn test_ttl_rewrite_resets_expiry_and_recency() {
        let mut ttl = TtlPolicy::new();
        ttl.on_write(&"a", SECOND);
        ttl.on_write(&"b", SECOND);
        ttl.on_write(&"a", SECOND * 5);

        assert_eq!(ttl.len(), 2);
        assert_eq!(ttl.remaining(&"a", SECOND), Some(SECOND * 4));
        assert_eq!(ttl.peek_victim(), Some(&"b"));
    }

    #[test]
    fn test_ttl_evict_clears_expiry() {
        let mut ttl = TtlPolicy::new();
        ttl.on_write(&"a", SECOND);
        ttl.on_write(&"b", SECOND);

        assert_eq!(ttl.evict(), Some("a"));
        assert!(!ttl.contains(&"a"));
        assert_eq!(ttl.expiry_len(), 1);
    }

    #[test]
    fn test_ttl_expired_keys() {
        let mut ttl = TtlPolicy::new();
        ttl.on_write(&"short", SECOND);
        ttl.on_write(&"long", SECOND * 10);

        assert_eq!(ttl.expired_keys(SECOND * 2), vec!["short"]);
        assert!(ttl.expired_keys(Duration::ZERO).is_empty());
    }

    #[test]
    fn test_ttl_remaining_saturates_at_zero() {
        let mut ttl = TtlPolicy::new();
        ttl.on_write(&"a", SECOND);

        assert_eq!(ttl.remaining(&"a", SECOND * 3), Some(Duration::ZERO));
        assert_eq!(ttl.remaining(&"missing", SECOND), None);
    }
}
