//! Cache Key Module
//!
//! Defines which types may be used as cache keys and how they are validated.

use std::fmt::Debug;
use std::hash::Hash;

// == Cache Key Trait ==
/// A type usable as a cache key.
///
/// `validate` runs before any mutation on `set`. Types with a value that
/// means "no key" must reject it here.
pub trait CacheKey: Hash + Eq + Clone + Debug {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl CacheKey for String {
    /// The empty string is the "no key" value for string keys.
    fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("key must not be empty".to_string());
        }
        Ok(())
    }
}

impl CacheKey for &str {
    fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("key must not be empty".to_string());
        }
        Ok(())
    }
}

macro_rules! impl_always_valid_key {
    ($($t:ty),* $(,)?) => {
        $(impl CacheKey for $t {})*
    };
}

impl_always_valid_key!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_key_validation() {
        assert!("key".to_string().validate().is_ok());
        assert!(String::new().validate().is_err());
        assert!("x".repeat(4096).validate().is_ok());
    }

    #[test]
    fn test_str_key_validation() {
        assert!("a".validate().is_ok());
        assert!("".validate().is_err());
    }

    #[test]
    fn test_integer_keys_always_valid() {
        assert!(0u64.validate().is_ok());
        assert!((-1i32).validate().is_ok());
    }
}
