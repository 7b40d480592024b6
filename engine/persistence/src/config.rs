//! Configuration for the persistence layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Base directory for persistence files
    pub data_dir: PathBuf,

    /// Write human-readable JSON
    pub pretty: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("./data"), pretty: true }
    }
}

impl PersistenceConfig {
    /// Create a new configuration with custom data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Default::default() }
    }

    /// Get the saved drafts directory path
    pub fn drafts_dir(&self) -> PathBuf {
        self.data_dir.join("drafts")
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.data_dir.as_os_str().is_empty() {
            return Err("data_dir must not be empty".to_string());
        }

        Ok(())
    }
}
