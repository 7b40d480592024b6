//! Draft session configuration

use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Draft session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Quiet period after the last change before the draft is written
    pub save_debounce_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { save_debounce_ms: 500 }
    }
}

impl SessionConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("DRAFT_SAVE_DEBOUNCE_MS") {
            config.save_debounce_ms = value.parse().map_err(|_| {
                BoardError::Config(format!("DRAFT_SAVE_DEBOUNCE_MS must be a number, got '{value}'"))
            })?;
        }
        Ok(config)
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_debounce() {
        assert_eq!(SessionConfig::default().save_debounce(), Duration::from_millis(500));
    }
}
