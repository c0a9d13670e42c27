//! LRU Policy Module
//!
//! Least Recently Used eviction on top of the arena-backed recency list.

use std::collections::HashMap;

use crate::cache::list::{NodeId, RecencyList};
use crate::cache::CacheKey;

// == LRU Policy ==
/// Tracks access order for LRU eviction.
///
/// `index` maps every tracked key to its node in `order`. Both are only
/// ever mutated together.
#[derive(Debug)]
pub struct LruPolicy<K> {
    order: RecencyList<K>,
    index: HashMap<K, NodeId>,
}

impl<K: CacheKey> LruPolicy<K> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: RecencyList::new(),
            index: HashMap::new(),
        }
    }

    // == On New Key ==
    /// Starts tracking `key` as the most recently used.
    pub fn on_new_key(&mut self, key: &K) {
        if let Some(&id) = self.index.get(key) {
            self.order.move_to_front(id);
            return;
        }
        let id = self.order.add_to_front(key.clone());
        self.index.insert(key.clone(), id);
    }

    // == On Access ==
    /// Marks `key` as most recently used.
    pub fn on_access(&mut self, key: &K) {
        if let Some(&id) = self.index.get(key) {
            self.order.move_to_front(id);
        }
    }

    // == Evict ==
    /// Removes and returns the least recently used key.
    pub fn evict(&mut self) -> Option<K> {
        let key = self.order.remove_last()?;
        self.index.remove(&key);
        Some(key)
    }

    // == Remove ==
    pub fn remove(&mut self, key: &K) {
        if let Some(id) = self.index.remove(key) {
            self.order.remove_node(id);
        }
    }

    /// Returns the next eviction candidate without removing it.
    pub fn peek_victim(&self) -> Option<&K> {
        self.order.peek_last()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }

    /// Keys from most- to least-recently-used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter()
    }
}

impl<K: CacheKey> Default for LruPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}
