//! Cache Module
//!
//! Capacity-bounded in-memory caching with LRU, LFU, FIFO and TTL eviction.

mod clock;
mod key;
mod list;
mod policy;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use key::CacheKey;
pub use list::{NodeId, RecencyList};
pub use policy::{EvictionPolicy, FifoPolicy, LfuPolicy, LruPolicy, TtlPolicy};
pub use stats::CacheStats;
pub use store::Cache;
