//! FIFO Policy Module
//!
//! First In, First Out eviction. Accesses never change the order.

use std::collections::VecDeque;

use crate::cache::CacheKey;

// == FIFO Policy ==
/// Keys in arrival order:
/// - Front = oldest insertion
/// - Back = newest insertion
#[derive(Debug)]
pub struct FifoPolicy<K> {
    queue: VecDeque<K>,
}

impl<K: CacheKey> FifoPolicy<K> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    // == On New Key ==
    pub fn on_new_key(&mut self, key: &K) {
        self.queue.push_back(key.clone());
    }

    // == Evict ==
    /// Pops the oldest key still present according to `is_present`.
    pub fn evict(&mut self, is_present: impl Fn(&K) -> bool) -> Option<K> {
        while let Some(key) = self.queue.pop_front() {
            if is_present(&key) {
                return Some(key);
            }
        }
        None
    }

    // == Remove ==
    /// Drops `key` from the queue. O(n), only used on explicit deletes.
    pub fn remove(&mut self, key: &K) {
        self.queue.retain(|k| k != key);
    }

    pub fn peek_victim(&self) -> Option<&K> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.queue.iter().any(|k| k == key)
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<K: CacheKey> Default for FifoPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_evicts_in_arrival_order() {
        let mut fifo = FifoPolicy::new();
        fifo.on_new_key(&"a");
        fifo.on_new_key(&"b");
        fifo.on_new_key(&"c");

        assert_eq!(fifo.evict(|_| true), Some("a"));
        assert_eq!(fifo.evict(|_| true), Some("b"));
        assert_eq!(fifo.evict(|_| true), Some("c"));
        assert_eq!(fifo.evict(|_| true), None);
    }

    #[test]
    fn test_fifo_skips_keys_no_longer_present() {
        let mut fifo = FifoPolicy::new();
        fifo.on_new_key(&"a");
        fifo.on_new_key(&"b");

        assert_eq!(fifo.evict(|k| *k != "a"), Some("b"));
        assert!(fifo.queue.is_empty());
    }

    #[test]
    fn test_fifo_remove() {
        let mut fifo = FifoPolicy::new();
        fifo.on_new_key(&"a");
        fifo.on_new_key(&"b");
        fifo.remove(&"a");

        assert_eq!(fifo.len(), 1);
        assert!(!fifo.contains(&"a"));
        assert_eq!(fifo.peek_victim(), Some(&"b"));
    }
}
