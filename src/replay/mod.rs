//! Replay Module
//!
//! Line-oriented command layer used by the `cache_replay` binary.
//!
//! # Commands
//! - `set <key> <value> [ttl_ms]`
//! - `get <key>`
//! - `del <key>`
//! - `purge`
//! - `stats`
//!
//! Blank lines and lines starting with `#` are ignored.

mod command;
mod handlers;

pub use command::{Command, ReplayError};
pub use handlers::{execute, respond, Reply};
