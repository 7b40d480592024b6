//! Error types for the draft board

use player_registry::PlayerId;
use thiserror::Error;

/// Result type alias for draft board operations
pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Draft board is still loading")]
    NotReady,

    #[error("Draft board failed to load: {0}")]
    LoadFailed(String),

    #[error("Unknown ranking source: {0}")]
    UnknownRankingSource(String),

    #[error("Roster slot not on this board: {0}")]
    UnknownSlot(String),

    #[error("Invalid roster slot key: {0}")]
    InvalidSlotKey(String),

    #[error("Player not in pool: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Price engine error: {0}")]
    PriceEngine(#[from] price_engine::PriceEngineError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] persistence::PersistenceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BoardError {
    pub fn load_failed(msg: impl Into<String>) -> Self {
        Self::LoadFailed(msg.into())
    }
}
