//! Replay Handlers
//!
//! Applies parsed commands to a cache and renders JSON replies.

use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::cache::{Cache, CacheStats, Clock};
use crate::replay::{Command, ReplayError};

// == Reply ==
/// Outcome of one command, serialized as one JSON line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Reply {
    Set {
        key: String,
    },
    Get {
        key: String,
        /// `null` on a miss
        value: Option<String>,
    },
    Del {
        key: String,
        removed: bool,
    },
    Purge {
        removed: usize,
    },
    Stats {
        #[serde(flatten)]
        stats: CacheStats,
        hit_rate: f64,
    },
}

/// Applies `command` to `cache`.
pub fn execute<C: Clock>(
    cache: &mut Cache<String, String, C>,
    command: Command,
) -> Result<Reply, ReplayError> {
    let reply = match command {
        Command::Set { key, value, ttl } => {
            match ttl {
                Some(ttl) => cache.set_with_ttl(key.clone(), value, ttl)?,
                None => cache.set(key.clone(), value)?,
            }
            Reply::Set { key }
        }
        Command::Get { key } => {
            let value = cache.get(&key).cloned();
            Reply::Get { key, value }
        }
        Command::Del { key } => {
            let removed = cache.delete(&key).is_some();
            Reply::Del { key, removed }
        }
        Command::Purge => Reply::Purge {
            removed: cache.purge_expired(),
        },
        Command::Stats => {
            let stats = cache.stats();
            let hit_rate = stats.hit_rate();
            Reply::Stats { stats, hit_rate }
        }
    };
    Ok(reply)
}

/// Parses and executes one input line, returning the JSON reply.
///
/// Errors become `{"error": "..."}` replies; blank lines yield `None`.
pub fn respond<C: Clock>(cache: &mut Cache<String, String, C>, line: &str) -> Option<String> {
    let result = Command::parse(line).and_then(|command| match command {
        Some(command) => execute(cache, command).map(Some),
        None => Ok(None),
    });

    match result {
        Ok(Some(reply)) => Some(
            serde_json::to_string(&reply)
                .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string()),
        ),
        Ok(None) => None,
        Err(e) => {
            warn!(line, error = %e, "command failed");
            Some(json!({ "error": e.to_string() }).to_string())
        }
    }
}
