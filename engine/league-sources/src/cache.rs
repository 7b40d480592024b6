//! Keyed TTL cache for large catalogs (e.g., the Sleeper NFL player list)

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedEntry<T> {
    value: T,
    cached_at: DateTime<Utc>,
}

/// Cache with a per-entry time-to-live
#[derive(Debug)]
pub struct CatalogCache<T> {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<String, CachedEntry<T>>>>,
}

impl<T: Clone> CatalogCache<T> {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::max_value()),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get a live entry, `None` if absent or expired
    pub async fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        let age = Utc::now() - entry.cached_at;
        if age > self.ttl {
            debug!("Cache entry {} expired (age: {:?})", key, age);
            return None;
        }

        Some(entry.value.clone())
    }

    pub async fn insert(&self, key: impl Into<String>, value: T) {
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), CachedEntry { value, cached_at: Utc::now() });
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result.
    ///
    /// Failed fetches are not cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get(key).await {
            debug!("Cache hit for {}", key);
            return Ok(value);
        }

        let value = fetch().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    pub async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Remove every expired entry
    pub async fn clear_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        let before = entries.len();
        entries.retain(|_, entry| now - entry.cached_at <= self.ttl);
        before - entries.len()
    }
}

impl<T> Clone for CatalogCache<T> {
    fn clone(&self) -> Self {
        Self { ttl: self.ttl, entries: Arc::clone(&self.entries) }
    }
}
