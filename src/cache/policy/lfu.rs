//! LFU Policy Module
//!
//! Least Frequently Used eviction with earliest-inserted tie-break.
//!
//! Every tracked key carries `(count, seq)` where `seq` is the order in
//! which the key was inserted. `order` is keyed by that pair, so its first
//! entry is always the lowest count and, among equal counts, the key that
//! was inserted first. Eviction is O(log k).

use std::collections::{BTreeMap, HashMap};

use crate::cache::CacheKey;

#[derive(Debug, Clone, Copy)]
struct Frequency {
    count: u64,
    seq: u64,
}

// == LFU Policy ==
#[derive(Debug)]
pub struct LfuPolicy<K> {
    counts: HashMap<K, Frequency>,
    order: BTreeMap<(u64, u64), K>,
    next_seq: u64,
}

impl<K: CacheKey> LfuPolicy<K> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    // == On New Key ==
    /// Starts tracking `key` with a count of zero.
    pub fn on_new_key(&mut self, key: &K) {
        if self.counts.contains_key(key) {
            return;
        }
        let freq = Frequency {
            count: 0,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.counts.insert(key.clone(), freq);
        self.order.insert((freq.count, freq.seq), key.clone());
    }

    // == On Access ==
    /// Bumps the count of `key` by exactly one.
    pub fn on_access(&mut self, key: &K) {
        let Some(freq) = self.counts.get_mut(key) else {
            return;
        };
        if let Some(tracked) = self.order.remove(&(freq.count, freq.seq)) {
            freq.count += 1;
            self.order.insert((freq.count, freq.seq), tracked);
        }
    }

    // == Evict ==
    /// Removes and returns the least frequently used key.
    pub fn evict(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.counts.remove(&key);
        Some(key)
    }

    // == Remove ==
    pub fn remove(&mut self, key: &K) {
        if let Some(freq) = self.counts.remove(key) {
            self.order.remove(&(freq.count, freq.seq));
        }
    }

    /// Current access count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.counts.get(key).map(|freq| freq.count)
    }

    pub fn peek_victim(&self) -> Option<&K> {
        self.order.values().next()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.order.clear();
    }
}

impl<K: CacheKey> Default for LfuPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_new_key_starts_at_zero() {
        let mut lfu = LfuPolicy::new();
        lfu.on_new_key(&"a");

        assert_eq!(lfu.frequency(&"a"), Some(0));
        assert_eq!(lfu.frequency(&"b"), None);
    }

    #[test]
    fn test_lfu_access_increments_by_one() {
        let mut lfu = LfuPolicy::new();
        lfu.on_new_key(&"a");
        lfu.on_access(&"a");
        lfu.on_access(&"a");

        assert_eq!(lfu.frequency(&"a"), Some(2));
    }

    #[test]
    fn test_lfu_evicts_least_frequent() {
        let mut lfu = LfuPolicy::new();
        lfu.on_new_key(&"a");
        lfu.on_new_key(&"b");
        lfu.on_access(&"a");
        lfu.on_access(&"a");

        assert_eq!(lfu.evict(), Some("b"));
        assert_eq!(lfu.len(), 1);
        assert_eq!(lfu.frequency(&"b"), None);
    }

    #[test]
    fn test_lfu_tie_break_is_earliest_inserted() {
        let mut lfu = LfuPolicy::new();
        lfu.on_new_key(&"c");
        lfu.on_new_key(&"a");
        lfu.on_new_key(&"b");
        lfu.on_access(&"c");
        lfu.on_access(&"a");
        lfu.on_access(&"b");

        assert_eq!(lfu.peek_victim(), Some(&"c"));
        assert_eq!(lfu.evict(), Some("c"));
        assert_eq!(lfu.evict(), Some("a"));
        assert_eq!(lfu.evict(), Some("b"));
        assert_eq!(lfu.evict(), None);
    }

    #[test]
    fn test_lfu_reinserted_key_goes_to_back_of_ties() {
        let mut lfu = LfuPolicy::new();
        lfu.on_new_key(&"a");
        lfu.on_new_key(&"b");
        lfu.remove(&"a");
        lfu.on_new_key(&"a");

        assert_eq!(lfu.evict(), Some("b"));
        assert_eq!(lfu.evict(), Some("a"));
    }

    #[test]
    fn test_lfu_remove_and_access_unknown_key() {
        let mut lfu = LfuPolicy::new();
        lfu.on_new_key(&"a");
        lfu.on_access(&"missing");
        lfu.remove(&"missing");
        lfu.remove(&"a");

        assert_eq!(lfu.len(), 0);
        assert_eq!(lfu.evict(), None);
    }
}
