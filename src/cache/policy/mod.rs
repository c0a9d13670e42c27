//! Eviction Policy Module
//!
//! The closed set of eviction strategies and the state each one keeps.

mod fifo;
mod lfu;
mod lru;
mod ttl;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::CacheKey;
use crate::error::CacheError;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use ttl::TtlPolicy;

// == Eviction Policy ==
/// Which entry to drop when the cache is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Least recently used
    Lru,
    /// Least frequently used, oldest insertion first among ties
    Lfu,
    /// First in, first out
    Fifo,
    /// Time-to-live expiry, LRU order under capacity pressure
    Ttl,
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
            EvictionPolicy::Fifo => "fifo",
            EvictionPolicy::Ttl => "ttl",
        };
        f.write_str(name)
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            "fifo" => Ok(EvictionPolicy::Fifo),
            "ttl" => Ok(EvictionPolicy::Ttl),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown eviction policy '{}', expected one of lru, lfu, fifo, ttl",
                other
            ))),
        }
    }
}

// == Policy State ==
/// Bookkeeping owned by the active policy, dispatched by variant.
#[derive(Debug)]
pub(crate) enum PolicyState<K> {
    Lru(LruPolicy<K>),
    Lfu(LfuPolicy<K>),
    Fifo(FifoPolicy<K>),
    Ttl(TtlPolicy<K>),
}

impl<K: CacheKey> PolicyState<K> {
    pub fn new(policy: EvictionPolicy) -> Self {
        match policy {
            EvictionPolicy::Lru => PolicyState::Lru(LruPolicy::new()),
            EvictionPolicy::Lfu => PolicyState::Lfu(LfuPolicy::new()),
            EvictionPolicy::Fifo => PolicyState::Fifo(FifoPolicy::new()),
            EvictionPolicy::Ttl => PolicyState::Ttl(TtlPolicy::new()),
        }
    }

    pub fn kind(&self) -> EvictionPolicy {
        match self {
            PolicyState::Lru(_) => EvictionPolicy::Lru,
            PolicyState::Lfu(_) => EvictionPolicy::Lfu,
            PolicyState::Fifo(_) => EvictionPolicy::Fifo,
            PolicyState::Ttl(_) => EvictionPolicy::Ttl,
        }
    }

    // == Hooks ==
    /// A read hit on `key`. TTL reads do not touch recency.
    pub fn on_access(&mut self, key: &K) {
        match self {
            PolicyState::Lru(lru) => lru.on_access(key),
            PolicyState::Lfu(lfu) => lfu.on_access(key),
            PolicyState::Fifo(_) | PolicyState::Ttl(_) => {}
        }
    }

    /// A write of a key that was not present.
    ///
    /// `expires_at` is only read by the TTL policy; the engine always
    /// provides it for that policy.
    pub fn on_new_key(&mut self, key: &K, expires_at: Option<Duration>) {
        match self {
            PolicyState::Lru(lru) => lru.on_new_key(key),
            PolicyState::Lfu(lfu) => lfu.on_new_key(key),
            PolicyState::Fifo(fifo) => fifo.on_new_key(key),
            PolicyState::Ttl(ttl) => ttl.on_write(key, expires_at.unwrap_or(Duration::MAX)),
        }
    }

    /// A write of a key that was already present.
    pub fn on_update(&mut self, key: &K, expires_at: Option<Duration>) {
        match self {
            PolicyState::Lru(lru) => lru.on_access(key),
            PolicyState::Lfu(lfu) => lfu.on_access(key),
            PolicyState::Fifo(_) => {}
            PolicyState::Ttl(ttl) => ttl.on_write(key, expires_at.unwrap_or(Duration::MAX)),
        }
    }

    // == Evict ==
    /// Picks a victim and drops it from every policy structure.
    pub fn evict(&mut self, is_present: impl Fn(&K) -> bool) -> Option<K> {
        match self {
            PolicyState::Lru(lru) => lru.evict(),
            PolicyState::Lfu(lfu) => lfu.evict(),
            PolicyState::Fifo(fifo) => fifo.evict(is_present),
            PolicyState::Ttl(ttl) => ttl.evict(),
        }
    }

    pub fn remove(&mut self, key: &K) {
        match self {
            PolicyState::Lru(lru) => lru.remove(key),
            PolicyState::Lfu(lfu) => lfu.remove(key),
            PolicyState::Fifo(fifo) => fifo.remove(key),
            PolicyState::Ttl(ttl) => ttl.remove(key),
        }
    }

    pub fn peek_victim(&self) -> Option<&K> {
        match self {
            PolicyState::Lru(lru) => lru.peek_victim(),
            PolicyState::Lfu(lfu) => lfu.peek_victim(),
            PolicyState::Fifo(fifo) => fifo.peek_victim(),
            PolicyState::Ttl(ttl) => ttl.peek_victim(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PolicyState::Lru(lru) => lru.len(),
            PolicyState::Lfu(lfu) => lfu.len(),
            PolicyState::Fifo(fifo) => fifo.len(),
            PolicyState::Ttl(ttl) => ttl.len(),
        }
    }

    #[cfg(test)]
    pub fn contains(&self, key: &K) -> bool {
        match self {
            PolicyState::Lru(lru) => lru.contains(key),
            PolicyState::Lfu(lfu) => lfu.contains(key),
            PolicyState::Fifo(fifo) => fifo.contains(key),
            PolicyState::Ttl(ttl) => ttl.contains(key),
        }
    }

    pub fn clear(&mut self) {
        match self {
            PolicyState::Lru(lru) => lru.clear(),
            PolicyState::Lfu(lfu) => lfu.clear(),
            PolicyState::Fifo(fifo) => fifo.clear(),
            PolicyState::Ttl(ttl) => ttl.clear(),
        }
    }

    pub fn as_lfu(&self) -> Option<&LfuPolicy<K>> {
        match self {
            PolicyState::Lfu(lfu) => Some(lfu),
            _ => None,
        }
    }

    pub fn as_ttl(&self) -> Option<&TtlPolicy<K>> {
        match self {
            PolicyState::Ttl(ttl) => Some(ttl),
            _ => None,
        }
    }
}
