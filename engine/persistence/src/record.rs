//! Versioned envelope around a saved draft blob

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved draft as stored: schema version, save time, and the untyped payload.
///
/// The payload's shape belongs to the caller; the store never inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    /// Schema version of `data`
    pub version: u32,

    /// When the record was written
    pub saved_at: DateTime<Utc>,

    /// The saved draft itself
    pub data: serde_json::Value,
}

impl DraftRecord {
    /// Create a record stamped with the current time
    pub fn new(version: u32, data: serde_json::Value) -> Self {
        Self { version, saved_at: Utc::now(), data }
    }
}
