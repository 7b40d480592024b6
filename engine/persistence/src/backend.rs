//! Draft store trait and the in-memory implementation

use crate::error::Result;
use crate::record::DraftRecord;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Key-value store for saved drafts, keyed by league id and draft name.
///
/// Writes are last-writer-wins per key.
#[async_trait::async_trait]
pub trait DraftStore: Send + Sync {
    /// Load a saved draft, `None` if nothing is stored under the key
    async fn load(&self, league_id: &str, draft_name: &str) -> Result<Option<DraftRecord>>;

    /// Store a draft, replacing any previous record under the key
    async fn save(&self, league_id: &str, draft_name: &str, record: DraftRecord) -> Result<()>;

    /// Remove a saved draft; returns whether anything was removed
    async fn delete(&self, league_id: &str, draft_name: &str) -> Result<bool>;

    /// Names of every draft saved for a league, sorted
    async fn list(&self, league_id: &str) -> Result<Vec<String>>;
}

/// In-memory draft store (for testing)
#[derive(Debug, Clone, Default)]
pub struct InMemoryDraftStore {
    records: Arc<Mutex<HashMap<(String, String), DraftRecord>>>,
}

impl InMemoryDraftStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all leagues
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait::async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn load(&self, league_id: &str, draft_name: &str) -> Result<Option<DraftRecord>> {
        let records = self.records.lock().await;
        Ok(records.get(&(league_id.to_string(), draft_name.to_string())).cloned())
    }

    async fn save(&self, league_id: &str, draft_name: &str, record: DraftRecord) -> Result<()> {
        let mut records = self.records.lock().await;
        records.insert((league_id.to_string(), draft_name.to_string()), record);
        Ok(())
    }

    async fn delete(&self, league_id: &str, draft_name: &str) -> Result<bool> {
        let mut records = self.records.lock().await;
        Ok(records.remove(&(league_id.to_string(), draft_name.to_string())).is_some())
    }

    async fn list(&self, league_id: &str) -> Result<Vec<String>> {
        let records = self.records.lock().await;
        let mut names: Vec<String> = records
            .keys()
            .filter(|(league, _)| league == league_id)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
