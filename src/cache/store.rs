//! Cache Store Module
//!
//! The cache engine: a primary key/value map plus the bookkeeping of one
//! eviction policy, kept in lockstep.
//!
//! Every path that removes a key from the primary map goes through
//! `evict_one` or `drop_key`, which also clear the policy's structures.
//!
//! # Concurrency
//! `Cache` is a single-owner structure. All methods that touch policy state
//! take `&mut self`; sharing one across threads is the caller's job (wrap
//! it in a `Mutex`, for example).

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::policy::PolicyState;
use crate::cache::{CacheKey, CacheStats, Clock, EvictionPolicy, SystemClock};
use crate::error::{CacheError, Result};

// == Cache ==
/// Capacity-bounded key/value cache with a pluggable eviction policy.
#[derive(Debug)]
pub struct Cache<K, V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Bookkeeping of the active eviction policy
    policy: PolicyState<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL used when `set` is called without one (TTL policy only)
    default_ttl: Option<Duration>,
    clock: C,
}

impl<K: CacheKey, V> Cache<K, V, SystemClock> {
    // == Constructors ==
    /// Creates a cache without a default TTL.
    ///
    /// With `EvictionPolicy::Ttl`, every write must then pass its own TTL.
    pub fn new(max_size: usize, policy: EvictionPolicy) -> Self {
        Self::with_clock(max_size, policy, None, SystemClock::new())
    }

    /// Creates a cache with an optional default TTL.
    pub fn with_default_ttl(
        max_size: usize,
        policy: EvictionPolicy,
        default_ttl: Option<Duration>,
    ) -> Self {
        Self::with_clock(max_size, policy, default_ttl, SystemClock::new())
    }
}

impl<K: CacheKey, V, C: Clock> Cache<K, V, C> {
    /// Creates a cache reading time from `clock`.
    pub fn with_clock(
        max_size: usize,
        policy: EvictionPolicy,
        default_ttl: Option<Duration>,
        clock: C,
    ) -> Self {
        Self {
            entries: HashMap::new(),
            policy: PolicyState::new(policy),
            stats: CacheStats::new(),
            max_size,
            default_ttl,
            clock,
        }
    }

    // == Get ==
    /// Looks up `key`, notifying the policy on a hit.
    ///
    /// Under the TTL policy an expired entry is removed here and reported
    /// as a miss; a live entry is returned without refreshing its recency.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if !self.entries.contains_key(key) {
            self.stats.record_miss();
            trace!(?key, "cache miss");
            return None;
        }

        if self.is_expired(key) {
            self.drop_key(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(?key, "entry expired on read");
            return None;
        }

        self.policy.on_access(key);
        self.stats.record_hit();
        trace!(?key, "cache hit");
        self.entries.get(key)
    }

    // == Peek ==
    /// Looks up `key` without any effect on policy state or stats.
    pub fn peek(&self, key: &K) -> Option<&V> {
        if self.is_expired(key) {
            return None;
        }
        self.entries.get(key)
    }

    // == Set ==
    /// Stores `value` under `key`, using the default TTL if the policy is TTL.
    ///
    /// If `key` is new and the cache is full, one entry is evicted first.
    ///
    /// # Errors
    /// `InvalidKey` for the "no key" value, `MissingTtl` under the TTL
    /// policy when no default TTL is configured.
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        self.insert(key, value, None)
    }

    /// Stores `value` under `key` with an explicit TTL.
    ///
    /// The TTL is ignored by every policy except `EvictionPolicy::Ttl`.
    ///
    /// # Arguments
    /// * `key` - Cache key, validated before anything changes
    /// * `value` - Value to store
    /// * `ttl` - Lifetime measured from now
    pub fn set_with_ttl(&mut self, key: K, value: V, ttl: Duration) -> Result<()> {
        self.insert(key, value, Some(ttl))
    }

    fn insert(&mut self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        key.validate().map_err(CacheError::InvalidKey)?;
        let expires_at = self.expiry_for(ttl)?;

        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            self.policy.on_update(&key, expires_at);
            return Ok(());
        }

        if self.max_size == 0 {
            debug!(?key, "capacity is zero, write discarded");
            return Ok(());
        }

        if self.entries.len() >= self.max_size {
            self.evict_one();
        }

        self.policy.on_new_key(&key, expires_at);
        self.entries.insert(key, value);
        self.stats.set_total_entries(self.entries.len());
        debug_assert_eq!(self.entries.len(), self.policy.len());
        Ok(())
    }

    /// Resolves the absolute expiry for a write, before anything mutates.
    fn expiry_for(&self, ttl: Option<Duration>) -> Result<Option<Duration>> {
        if self.policy.kind() != EvictionPolicy::Ttl {
            if ttl.is_some() {
                debug!(policy = %self.policy.kind(), "ttl ignored by non-ttl policy");
            }
            return Ok(None);
        }
        let ttl = ttl.or(self.default_ttl).ok_or(CacheError::MissingTtl)?;
        Ok(Some(self.clock.now().saturating_add(ttl)))
    }

    // == Delete ==
    /// Removes `key`, returning its value if it was present.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let value = self.entries.remove(key)?;
        self.policy.remove(key);
        self.stats.set_total_entries(self.entries.len());
        Some(value)
    }

    // == Purge Expired ==
    /// Removes every expired entry. Returns how many were removed.
    ///
    /// Always 0 for policies other than TTL.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expired = match self.policy.as_ttl() {
            Some(ttl) => ttl.expired_keys(now),
            None => return 0,
        };

        for key in &expired {
            self.drop_key(key);
            self.stats.record_expiration();
        }

        if !expired.is_empty() {
            debug!(count = expired.len(), "purged expired entries");
        }
        expired.len()
    }

    // == Clear ==
    /// Removes every entry and resets the policy's bookkeeping.
    ///
    /// Hit, miss, eviction and expiration counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.policy.clear();
        self.stats.set_total_entries(0);
    }

    // == Introspection ==
    /// True if `key` is stored and not expired. No policy side effects.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key) && !self.is_expired(key)
    }

    /// Number of stored entries, including expired ones not yet cleaned up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries, as given at construction.
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// The eviction policy this cache was built with.
    pub fn policy(&self) -> EvictionPolicy {
        self.policy.kind()
    }

    /// TTL applied by `set` under the TTL policy.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    /// Access count of `key` under the LFU policy.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.policy.as_lfu().and_then(|lfu| lfu.frequency(key))
    }

    /// Time left before `key` expires under the TTL policy.
    pub fn expires_in(&self, key: &K) -> Option<Duration> {
        let now = self.clock.now();
        self.policy.as_ttl().and_then(|ttl| ttl.remaining(key, now))
    }

    /// The key the policy would evict next.
    pub fn next_victim(&self) -> Option<&K> {
        self.policy.peek_victim()
    }

    /// Snapshot of the counters with `total_entries` brought up to date.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Internals ==
    fn is_expired(&self, key: &K) -> bool {
        self.policy
            .as_ttl()
            .map(|ttl| ttl.is_expired(key, self.clock.now()))
            .unwrap_or(false)
    }

    fn evict_one(&mut self) {
        let entries = &self.entries;
        let victim = self.policy.evict(|k| entries.contains_key(k));
        match victim {
            Some(victim) => {
                self.entries.remove(&victim);
                self.stats.record_eviction();
                debug!(key = ?victim, policy = %self.policy.kind(), "evicted entry");
            }
            None => debug_assert!(
                self.entries.is_empty(),
                "policy has no victim but the store holds {} entries",
                self.entries.len()
            ),
        }
    }

    fn drop_key(&mut self, key: &K) {
        self.entries.remove(key);
        self.policy.remove(key);
        self.stats.set_total_entries(self.entries.len());
    }

    /// Panics if the store and the policy disagree on the set of keys.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        assert_eq!(
            self.entries.len(),
            self.policy.len(),
            "store and policy track different numbers of keys"
        );
        for key in self.entries.keys() {
            assert!(self.policy.contains(key), "policy lost track of {:?}", key);
        }
        if let Some(ttl) = self.policy.as_ttl() {
            assert_eq!(ttl.expiry_len(), self.entries.len());
        }
        if self.max_size > 0 {
            assert!(self.entries.len() <= self.max_size);
        } else {
            assert!(self.entries.is_empty());
        }
    }
}
