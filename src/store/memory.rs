//! In-process configuration store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::store::{ConfigurationStore, RuntimeRecord, StoreError, StoreResult, StoredDocument};

/// A thread-safe map of store key -> document.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, StoredDocument>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a driver-shaped document under `filepath`.
    pub fn insert_raw(&self, filepath: impl Into<String>, document: Value) {
        self.inner.insert(filepath.into(), StoredDocument::Raw(document));
    }

    /// Get the normalized record under `filepath`, if present and well formed.
    pub fn get(&self, filepath: &str) -> Option<RuntimeRecord> {
        self.inner
            .get(filepath)
            .and_then(|r| r.value().clone().normalize().ok().flatten())
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl ConfigurationStore for MemoryStore {
    async fn load_document(&self, filepath: &str) -> StoreResult<Option<StoredDocument>> {
        Ok(self.inner.get(filepath).map(|r| r.value().clone()))
    }

    async fn create(&self, record: RuntimeRecord) -> StoreResult<()> {
        match self.inner.entry(record.filepath.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StoreError::AlreadyExists(record.filepath)),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                tracing::debug!(filepath = %record.filepath, "Created runtime record");
                slot.insert(record.into());
                Ok(())
            }
        }
    }

    async fn update(&self, record: RuntimeRecord) -> StoreResult<()> {
        match self.inner.get_mut(&record.filepath) {
            Some(mut existing) => {
                tracing::debug!(filepath = %record.filepath, revision = record.meta.revision, "Updated runtime record");
                *existing = record.into();
                Ok(())
            }
            None => Err(StoreError::NotFound(record.filepath)),
        }
    }
}
