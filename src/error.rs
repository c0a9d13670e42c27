//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
///
/// A cache miss is never an error; lookups return `Option` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity is not a non-negative integer
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    /// Key is the reserved "no key" value or otherwise unusable
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// TTL policy write with neither a call-site TTL nor a default TTL
    #[error("Missing TTL: no ttl given and no default_ttl configured")]
    MissingTtl,

    /// Configuration value could not be interpreted
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::InvalidCapacity("max_size cannot be negative".to_string()).to_string(),
            "Invalid capacity: max_size cannot be negative"
        );
        assert_eq!(
            CacheError::InvalidKey("empty".to_string()).to_string(),
            "Invalid key: empty"
        );
        assert!(CacheError::MissingTtl.to_string().contains("default_ttl"));
    }
}
