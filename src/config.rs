//! Configuration Module
//!
//! Builds cache settings from environment variables or JSON.

use std::env::{self, VarError};
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::cache::{Cache, CacheKey, EvictionPolicy};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Eviction policy
    pub policy: EvictionPolicy,
    /// Default TTL for writes without one (TTL policy only)
    pub default_ttl: Option<Duration>,
}

/// JSON shape of a config document. `max_entries` is kept untyped so a bad
/// capacity is reported as `InvalidCapacity` rather than a generic parse error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    max_entries: Value,
    #[serde(default = "default_policy")]
    policy: EvictionPolicy,
    #[serde(default)]
    default_ttl_ms: Option<u64>,
}

fn default_policy() -> EvictionPolicy {
    EvictionPolicy::Lru
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `EVICTION_POLICY` - One of `lru`, `lfu`, `fifo`, `ttl` (default: `lru`)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: unset)
    ///
    /// Malformed values are errors rather than silently replaced by defaults.
    pub fn from_env() -> Result<Self> {
        let max_entries = match read_env("MAX_ENTRIES", CacheError::InvalidCapacity)? {
            Some(raw) => parse_capacity(&raw)?,
            None => 1000,
        };
        let policy = match read_env("EVICTION_POLICY", CacheError::InvalidConfig)? {
            Some(raw) => raw.parse()?,
            None => default_policy(),
        };
        let default_ttl = match read_env("DEFAULT_TTL_MS", CacheError::InvalidConfig)? {
            Some(raw) => Some(parse_ttl_ms(&raw)?),
            None => None,
        };

        Ok(Self {
            max_entries,
            policy,
            default_ttl,
        })
    }

    /// Parses a JSON document such as
    /// `{"max_entries": 64, "policy": "ttl", "default_ttl_ms": 500}`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let doc: ConfigDocument =
            serde_json::from_str(raw).map_err(|e| CacheError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            max_entries: capacity_from_json(&doc.max_entries)?,
            policy: doc.policy,
            default_ttl: doc.default_ttl_ms.map(Duration::from_millis),
        })
    }

    /// Builds an empty cache with these settings.
    pub fn build<K: CacheKey, V>(&self) -> Cache<K, V> {
        Cache::with_default_ttl(self.max_entries, self.policy, self.default_ttl)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            policy: EvictionPolicy::Lru,
            default_ttl: None,
        }
    }
}

// == Parsing ==
/// Reads an environment variable. Unset is `None`; a value that is not
/// valid unicode is reported through `invalid`.
fn read_env(name: &str, invalid: fn(String) -> CacheError) -> Result<Option<String>> {
    match env::var(name) {
        Ok(raw) => Ok(Some(raw)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(invalid(format!("{} is not valid unicode", name))),
    }
}

/// Parses a capacity, rejecting non-integers and negative numbers.
pub fn parse_capacity(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    let value: i128 = trimmed.parse().map_err(|_| {
        CacheError::InvalidCapacity(format!("max_entries must be an integer, got '{}'", trimmed))
    })?;
    if value < 0 {
        return Err(CacheError::InvalidCapacity(format!(
            "max_entries cannot be negative, got {}",
            value
        )));
    }
    usize::try_from(value).map_err(|_| {
        CacheError::InvalidCapacity(format!("max_entries {} is too large", value))
    })
}

/// Parses a TTL given in whole milliseconds.
pub fn parse_ttl_ms(raw: &str) -> Result<Duration> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| {
            CacheError::InvalidConfig(format!(
                "ttl must be a non-negative number of milliseconds, got '{}'",
                trimmed
            ))
        })
}

fn capacity_from_json(value: &Value) -> Result<usize> {
    match value {
        Value::Number(n) if n.is_u64() || n.is_i64() => parse_capacity(&n.to_string()),
        other => Err(CacheError::InvalidCapacity(format!(
            "max_entries must be an integer, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.policy, EvictionPolicy::Lru);
        assert_eq!(config.default_ttl, None);
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env to avoid races between tests
        env::remove_var("MAX_ENTRIES");
        env::remove_var("EVICTION_POLICY");
        env::remove_var("DEFAULT_TTL_MS");
        assert_eq!(CacheConfig::from_env().unwrap(), CacheConfig::default());

        env::set_var("MAX_ENTRIES", "16");
        env::set_var("EVICTION_POLICY", "TTL");
        env::set_var("DEFAULT_TTL_MS", "250");
        let config = CacheConfig::from_env().unwrap();
        assert_eq!(config.max_entries, 16);
        assert_eq!(config.policy, EvictionPolicy::Ttl);
        assert_eq!(config.default_ttl, Some(Duration::from_millis(250)));

        env::set_var("MAX_ENTRIES", "-1");
        assert!(matches!(
            CacheConfig::from_env(),
            Err(CacheError::InvalidCapacity(_))
        ));

        #[cfg(unix)]
        {
            use std::ffi::OsStr;
            use std::os::unix::ffi::OsStrExt;

            env::set_var("MAX_ENTRIES", OsStr::from_bytes(&[0x66, 0x80]));
            assert!(matches!(
                CacheConfig::from_env(),
                Err(CacheError::InvalidCapacity(_))
            ));

            env::set_var("MAX_ENTRIES", "16");
            env::set_var("EVICTION_POLICY", OsStr::from_bytes(&[0xff]));
            assert!(matches!(
                CacheConfig::from_env(),
                Err(CacheError::InvalidConfig(_))
            ));
        }

        env::remove_var("MAX_ENTRIES");
        env::remove_var("EVICTION_POLICY");
        env::remove_var("DEFAULT_TTL_MS");
    }

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("0").unwrap(), 0);
        assert_eq!(parse_capacity(" 42 ").unwrap(), 42);

        let Err(CacheError::InvalidCapacity(msg)) = parse_capacity("abc") else {
            panic!("expected InvalidCapacity");
        };
        assert!(msg.contains("integer"));

        let Err(CacheError::InvalidCapacity(msg)) = parse_capacity("-3") else {
            panic!("expected InvalidCapacity");
        };
        assert!(msg.contains("negative"));

        assert!(parse_capacity("1.5").is_err());
    }

    #[test]
    fn test_parse_ttl_ms() {
        assert_eq!(parse_ttl_ms("1500").unwrap(), Duration::from_millis(1500));
        assert!(matches!(parse_ttl_ms("-5"), Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_from_json() {
        let config =
            CacheConfig::from_json(r#"{"max_entries": 64, "policy": "ttl", "default_ttl_ms": 500}"#)
                .unwrap();
        assert_eq!(config.max_entries, 64);
        assert_eq!(config.policy, EvictionPolicy::Ttl);
        assert_eq!(config.default_ttl, Some(Duration::from_millis(500)));

        let config = CacheConfig::from_json(r#"{"max_entries": 8}"#).unwrap();
        assert_eq!(config.policy, EvictionPolicy::Lru);
        assert_eq!(config.default_ttl, None);
    }

    #[test]
    fn test_config_from_json_rejects_bad_capacity() {
        assert!(matches!(
            CacheConfig::from_json(r#"{"max_entries": -1}"#),
            Err(CacheError::InvalidCapacity(_))
        ));
        assert!(matches!(
            CacheConfig::from_json(r#"{"max_entries": 2.5}"#),
            Err(CacheError::InvalidCapacity(_))
        ));
        assert!(matches!(
            CacheConfig::from_json(r#"{"max_entries": "ten"}"#),
            Err(CacheError::InvalidCapacity(_))
        ));
        assert!(matches!(
            CacheConfig::from_json(r#"{"max_entries": 4, "policy": "random"}"#),
            Err(CacheError::InvalidConfig(_))
        ));
        assert!(matches!(
            CacheConfig::from_json(r#"{"policy": "lru"}"#),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_capacity_errors_name_the_field() {
        let Err(CacheError::InvalidCapacity(msg)) = CacheConfig::from_json(r#"{"max_entries": -1}"#)
        else {
            panic!("expected InvalidCapacity");
        };
        assert!(msg.starts_with("max_entries"));

        let Err(CacheError::InvalidCapacity(msg)) = parse_capacity("abc") else {
            panic!("expected InvalidCapacity");
        };
        assert!(msg.starts_with("max_entries"));
    }

    #[test]
    fn test_config_build() {
        let config = CacheConfig {
            max_entries: 2,
            policy: EvictionPolicy::Fifo,
            default_ttl: None,
        };
        let mut cache = config.build::<String, u32>();
        cache.set("a".to_string(), 1).unwrap();

        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.policy(), EvictionPolicy::Fifo);
        assert_eq!(cache.get(&"a".to_string()), Some(&1));
    }
}
