//! Persistence store for the runtime record.
//!
//! # Data Flow
//! ```text
//! reconciliation
//!     → ConfigurationStore::load (driver document)
//!     → StoredDocument::normalize (canonical RuntimeRecord or absent)
//!     → create / update written back in the background
//! ```
//!
//! # Design Decisions
//! - Normalization happens once, at this boundary, never in callers
//! - Keys are opaque store paths; the store decides where they live
//! - Stores are shared behind `Arc<dyn ConfigurationStore>`

pub mod file;
pub mod memory;
pub mod record;

use std::path::{Component, Path};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{StoreBackend, StoreSettings};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{RecordMeta, RuntimeRecord, StoredDocument};

/// Errors raised by a configuration store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed document at '{filepath}': {reason}")]
    Malformed { filepath: String, reason: String },

    #[error("no document at '{0}'")]
    NotFound(String),

    #[error("document already exists at '{0}'")]
    AlreadyExists(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store key '{0}' must be a non-empty relative path without '..'")]
    InvalidKey(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A document store holding configuration records.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Fetch the document stored under `filepath`, as the backend holds it.
    async fn load_document(&self, filepath: &str) -> StoreResult<Option<StoredDocument>>;

    /// Store a new record under `record.filepath`.
    async fn create(&self, record: RuntimeRecord) -> StoreResult<()>;

    /// Replace the record stored under `record.filepath`.
    async fn update(&self, record: RuntimeRecord) -> StoreResult<()>;

    /// Fetch and normalize the record stored under `filepath`.
    async fn load(&self, filepath: &str) -> StoreResult<Option<RuntimeRecord>> {
        match self.load_document(filepath).await? {
            Some(document) => document.normalize(),
            None => Ok(None),
        }
    }
}

/// Whether `key` is a non-empty relative path that cannot climb out of a root.
pub(crate) fn is_contained_key(key: &str) -> bool {
    if key.is_empty() {
        return false;
    }
    Path::new(key)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Open the store described by `settings`.
pub fn open_store(settings: &StoreSettings) -> Arc<dyn ConfigurationStore> {
    match settings.backend {
        StoreBackend::File => Arc::new(FileStore::new(&settings.root)),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Call-counting store for unit tests.

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct SpyStore {
        pub document: Mutex<Option<StoredDocument>>,
        pub fail_load: bool,
        pub loads: AtomicUsize,
        pub creates: AtomicUsize,
        pub updates: AtomicUsize,
        pub written: Mutex<Vec<RuntimeRecord>>,
    }

    impl SpyStore {
        pub fn with_document(document: impl Into<StoredDocument>) -> Self {
            Self {
                document: Mutex::new(Some(document.into())),
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_load: true,
                ..Self::default()
            }
        }

        pub fn counts(&self) -> (usize, usize, usize) {
            (
                self.loads.load(Ordering::SeqCst),
                self.creates.load(Ordering::SeqCst),
                self.updates.load(Ordering::SeqCst),
            )
        }
    }

    #[async_trait]
    impl ConfigurationStore for SpyStore {
        async fn load_document(&self, _filepath: &str) -> StoreResult<Option<StoredDocument>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_load {
                return Err(StoreError::Unavailable("load failed".into()));
            }
            Ok(self.document.lock().unwrap().clone())
        }

        async fn create(&self, record: RuntimeRecord) -> StoreResult<()> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            self.written.lock().unwrap().push(record);
            Ok(())
        }

        async fn update(&self, record: RuntimeRecord) -> StoreResult<()> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.written.lock().unwrap().push(record);
            Ok(())
        }
    }
}
