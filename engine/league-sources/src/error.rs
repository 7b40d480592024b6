//! Error types for league sources

use crate::types::Platform;
use thiserror::Error;

/// Result type alias for league source operations
pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{platform} API error: {message}")]
    Api { platform: Platform, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Season {season} not found for league {league_id}")]
    SeasonNotFound { league_id: String, season: i32 },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl SourceError {
    pub fn api(platform: Platform, message: impl Into<String>) -> Self {
        Self::Api { platform, message: message.into() }
    }
}
