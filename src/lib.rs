//! Cache Engine - An in-process, capacity-bounded key/value cache
//!
//! Provides interchangeable LRU, LFU, FIFO and TTL eviction policies with
//! O(1) bookkeeping kept in lockstep with the primary store.
//!
//! `Cache` is not synchronized; callers sharing one across threads must
//! wrap it themselves.

pub mod cache;
pub mod config;
pub mod error;
pub mod replay;

pub use cache::{Cache, CacheKey, CacheStats, Clock, EvictionPolicy, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
