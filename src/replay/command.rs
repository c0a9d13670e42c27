//! Replay command parsing.

use std::time::Duration;

use thiserror::Error;

use crate::config::parse_ttl_ms;
use crate::error::CacheError;

// == Replay Error ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// Line could not be parsed as a command
    #[error("Invalid command: {0}")]
    Parse(String),

    /// The cache rejected the operation
    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == Command ==
/// One parsed replay line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set {
        key: String,
        value: String,
        ttl: Option<Duration>,
    },
    Get {
        key: String,
    },
    Del {
        key: String,
    },
    Purge,
    Stats,
}

impl Command {
    /// Parses one line. Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str) -> Result<Option<Self>, ReplayError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = match parts.as_slice() {
            ["set", key, value] => Command::Set {
                key: key.to_string(),
                value: value.to_string(),
                ttl: None,
            },
            ["set", key, value, ttl] => Command::Set {
                key: key.to_string(),
                value: value.to_string(),
                ttl: Some(parse_ttl_ms(ttl)?),
            },
            ["get", key] => Command::Get {
                key: key.to_string(),
            },
            ["del", key] => Command::Del {
                key: key.to_string(),
            },
            ["purge"] => Command::Purge,
            ["stats"] => Command::Stats,
            _ => return Err(ReplayError::Parse(line.to_string())),
        };
        Ok(Some(command))
    }
}
