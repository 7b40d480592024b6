//! Local file-based draft store
//!
//! Layout: `<data_dir>/drafts/<league>/<draft>.json`. League ids and draft
//! names are percent-encoded so any user-chosen name maps to a safe file name.

use crate::backend::DraftStore;
use crate::config::PersistenceConfig;
use crate::error::{PersistenceError, Result};
use crate::record::DraftRecord;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

const EXTENSION: &str = "json";

/// Distinguishes the temp files of overlapping writes to one draft
static WRITE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Local file-based draft store
#[derive(Debug, Clone)]
pub struct LocalDraftStore {
    config: PersistenceConfig,
    initialized: bool,
}

impl LocalDraftStore {
    /// Create a new local draft store
    pub fn new(config: PersistenceConfig) -> Result<Self> {
        config.validate().map_err(PersistenceError::config)?;
        Ok(Self { config, initialized: false })
    }

    /// Create a new local draft store with default config
    pub fn with_default_config(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::new(PersistenceConfig::new(data_dir))
    }

    /// Create the drafts directory
    pub async fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }

        tokio::fs::create_dir_all(self.config.drafts_dir()).await?;
        self.initialized = true;

        info!("Local draft store initialized at: {:?}", self.config.drafts_dir());
        Ok(())
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    fn ensure_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(PersistenceError::invalid_operation("Draft store not initialized"));
        }
        Ok(())
    }

    fn league_dir(&self, league_id: &str) -> PathBuf {
        self.config.drafts_dir().join(encode_name(league_id))
    }

    fn draft_path(&self, league_id: &str, draft_name: &str) -> PathBuf {
        self.league_dir(league_id).join(format!("{}.{EXTENSION}", encode_name(draft_name)))
    }
}

#[async_trait::async_trait]
impl DraftStore for LocalDraftStore {
    async fn load(&self, league_id: &str, draft_name: &str) -> Result<Option<DraftRecord>> {
        self.ensure_initialized()?;
        let path = self.draft_path(league_id, draft_name);

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: DraftRecord = serde_json::from_str(&contents).map_err(|e| {
            PersistenceError::corruption(format!("{}: {}", path.display(), e))
        })?;
        debug!("Loaded draft {}/{} (version {})", league_id, draft_name, record.version);
        Ok(Some(record))
    }

    async fn save(&self, league_id: &str, draft_name: &str, record: DraftRecord) -> Result<()> {
        self.ensure_initialized()?;
        tokio::fs::create_dir_all(self.league_dir(league_id)).await?;

        let json = if self.config.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };

        // Write then rename so a crash never leaves a half-written record
        let path = self.draft_path(league_id, draft_name);
        let sequence = WRITE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let tmp_path =
            path.with_extension(format!("{EXTENSION}.{}-{sequence}.tmp", std::process::id()));
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        debug!("Saved draft {}/{} to {:?}", league_id, draft_name, path);
        Ok(())
    }

    async fn delete(&self, league_id: &str, draft_name: &str) -> Result<bool> {
        self.ensure_initialized()?;
        match tokio::fs::remove_file(self.draft_path(league_id, draft_name)).await {
            Ok(()) => {
                info!("Deleted draft {}/{}", league_id, draft_name);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, league_id: &str) -> Result<Vec<String>> {
        self.ensure_initialized()?;
        let mut entries = match tokio::fs::read_dir(self.league_dir(league_id)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|stem| stem.to_str()).and_then(decode_name)
            {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Create a new local draft store with default configuration
pub fn create_local_store(data_dir: impl Into<PathBuf>) -> Result<LocalDraftStore> {
    LocalDraftStore::with_default_config(data_dir)
}

/// Create a new local draft store with custom configuration
pub fn create_local_store_with_config(config: PersistenceConfig) -> Result<LocalDraftStore> {
    LocalDraftStore::new(config)
}

/// Percent-encode everything except ASCII alphanumerics, `-` and `_`
fn encode_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

fn decode_name(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}
