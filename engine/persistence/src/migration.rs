//! Forward-only schema migrations for saved drafts
//!
//! Each step upgrades a payload from version `n` to `n + 1`. Steps run in
//! order until the payload reaches the current version. Any gap, unknown
//! version or failing step makes the whole record unusable.

use crate::error::{PersistenceError, Result};
use crate::record::DraftRecord;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One upgrade step: payload at version `n` -> payload at version `n + 1`
pub type MigrationFn = fn(Value) -> std::result::Result<Value, String>;

/// Ordered chain of migrations ending at `current_version`
#[derive(Debug, Clone)]
pub struct Migrator {
    current_version: u32,
    steps: BTreeMap<u32, MigrationFn>,
}

impl Migrator {
    /// Create a chain with no steps; only records already at `current_version` load
    pub fn new(current_version: u32) -> Self {
        Self { current_version, steps: BTreeMap::new() }
    }

    /// Register the step that upgrades `from_version` to `from_version + 1`
    pub fn with_step(mut self, from_version: u32, step: MigrationFn) -> Self {
        self.steps.insert(from_version, step);
        self
    }

    pub fn current_version(&self) -> u32 {
        self.current_version
    }

    /// Bring `record` up to the current version
    pub fn migrate(&self, record: DraftRecord) -> Result<Value> {
        if record.version > self.current_version {
            return Err(PersistenceError::migration(format!(
                "record version {} is newer than supported version {}",
                record.version, self.current_version
            )));
        }

        let mut version = record.version;
        let mut data = record.data;
        while version < self.current_version {
            let step = self.steps.get(&version).ok_or_else(|| {
                PersistenceError::migration(format!("no migration from version {version}"))
            })?;
            data = step(data).map_err(|e| {
                PersistenceError::migration(format!("migration from version {version} failed: {e}"))
            })?;
            debug!("Migrated saved draft from version {} to {}", version, version + 1);
            version += 1;
        }

        Ok(data)
    }

    /// Like [`Migrator::migrate`], but a record that cannot be upgraded is treated as absent
    pub fn upgrade(&self, record: DraftRecord) -> Option<Value> {
        match self.migrate(record) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Discarding saved draft: {}", e);
                None
            }
        }
    }
}
