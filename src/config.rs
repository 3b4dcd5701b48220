//! Store settings loaded from JSON.

use crate::error::ConfigError;
use crate::reorder::SortPolicy;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

pub const DEFAULT_LOG_AUTHOR: &str = "user";

/// Store settings. Board state itself is never read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Author recorded on every activity log entry.
    pub log_author: String,
    pub sort_policy: SortPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            log_author: DEFAULT_LOG_AUTHOR.to_string(),
            sort_policy: SortPolicy::default(),
        }
    }
}

impl StoreConfig {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Reads the config at `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(data) => Self::from_json(&data),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
