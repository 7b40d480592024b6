//! # Persistence Layer
//!
//! Storage for saved mock drafts, keyed by league id and draft name.
//!
//! ## Architecture
//!
//! - **DraftStore**: Abstract trait for different storage backends
//! - **LocalDraftStore**: Local JSON-file implementation
//! - **InMemoryDraftStore**: In-memory implementation for tests
//! - **DraftRecord**: Versioned envelope around the caller's payload
//! - **Migrator**: Ordered chain of pure upgrade steps between payload versions
//!
//! ## Usage
//!
//! ```rust
//! use persistence::{create_local_store, DraftRecord, DraftStore};
//! use tempfile::TempDir;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let temp_dir = TempDir::new()?;
//!     let mut store = create_local_store(temp_dir.path())?;
//!     store.initialize().await?;
//!
//!     let record = DraftRecord::new(3, serde_json::json!({ "rosterSelections": {} }));
//!     store.save("123456", "mock", record).await?;
//!     assert!(store.load("123456", "mock").await?.is_some());
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod local;
pub mod migration;
pub mod record;

pub use backend::{DraftStore, InMemoryDraftStore};
pub use config::PersistenceConfig;
pub use error::{PersistenceError, Result};
pub use local::{create_local_store, create_local_store_with_config, LocalDraftStore};
pub use migration::{MigrationFn, Migrator};
pub use record::DraftRecord;
