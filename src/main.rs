//! Cache Replay - drives a cache from a stream of text commands
//!
//! Reads commands from stdin, one per line, and writes one JSON reply per
//! command to stdout. See `cache_engine::replay` for the command set.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_engine::replay::respond;
use cache_engine::CacheConfig;

/// Main entry point for the cache replay tool.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (to stderr)
/// 2. Load configuration from environment variables
/// 3. Create the cache with the configured policy
/// 4. Replay stdin until EOF
fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_engine=info,cache_replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = CacheConfig::from_env().context("failed to load cache configuration")?;
    info!(
        max_entries = config.max_entries,
        policy = %config.policy,
        default_ttl = ?config.default_ttl,
        "configuration loaded"
    );

    let mut cache = config.build::<String, String>();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut commands = 0usize;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read command from stdin")?;
        if let Some(reply) = respond(&mut cache, &line) {
            writeln!(stdout, "{}", reply).context("failed to write reply")?;
            commands += 1;
        }
    }

    let stats = cache.stats();
    info!(
        commands,
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        expirations = stats.expirations,
        "replay finished"
    );
    Ok(())
}
