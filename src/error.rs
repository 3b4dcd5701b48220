//! Error types for refused mutations and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Mutations that were refused. Lookup misses are never errors; they are
/// no-ops.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KanbanError {
    /// Deleting the board would leave the collection empty.
    #[error("at least one board must remain")]
    LastBoard,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
