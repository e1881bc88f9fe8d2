//! Error types surfaced by level construction and configuration loading.
//!
//! In-frame interaction never errors: out-of-range grabs, empty-handed
//! use and pointer misses are silent no-ops.

use std::path::PathBuf;

use thiserror::Error;

/// Unknown mode identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode identifier `{0}` (expected \"day\" or \"night\")")]
pub struct ModeParseError(pub String);

/// Failure while constructing a level. Fatal to that level: the
/// session does not start ticking.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("asset `{path}` unavailable: {reason}")]
    AssetUnavailable { path: String, reason: String },
}

/// Failure while loading a `SimConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
