//! Error types for the price engine

use thiserror::Error;

/// Result type alias for price engine operations
pub type Result<T> = std::result::Result<T, PriceEngineError>;

/// Errors that can occur while fitting curves or predicting prices
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceEngineError {
    /// A fit or analysis was requested with no data points
    #[error("Cannot fit a price curve to an empty {0}")]
    EmptyInput(&'static str),

    /// Estimation settings violate their invariants
    #[error("Invalid estimation settings: {0}")]
    InvalidSettings(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PriceEngineError {
    /// Create a new invalid settings error
    pub fn invalid_settings(msg: impl Into<String>) -> Self {
        Self::InvalidSettings(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
