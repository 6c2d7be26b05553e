//! JSON-file configuration store.
//!
//! Each key maps to a file under the store root. Writes land in a sibling
//! temp file first and are renamed into place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use crate::store::{
    is_contained_key, ConfigurationStore, RuntimeRecord, StoreError, StoreResult, StoredDocument,
};

/// Store rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `filepath` under the root. Keys that could escape it are refused.
    fn path_for(&self, filepath: &str) -> StoreResult<PathBuf> {
        if !is_contained_key(filepath) {
            return Err(StoreError::InvalidKey(filepath.to_string()));
        }
        Ok(self.root.join(filepath))
    }

    async fn write(&self, path: &Path, record: &RuntimeRecord) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(record)?;
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, body).await?;
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigurationStore for FileStore {
    async fn load_document(&self, filepath: &str) -> StoreResult<Option<StoredDocument>> {
        let path = self.path_for(filepath)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| StoreError::Malformed {
            filepath: filepath.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(StoredDocument::Raw(value)))
    }

    async fn create(&self, record: RuntimeRecord) -> StoreResult<()> {
        let path = self.path_for(&record.filepath)?;
        if fs::try_exists(&path).await? {
            return Err(StoreError::AlreadyExists(record.filepath));
        }
        self.write(&path, &record).await?;
        tracing::info!(filepath = %record.filepath, "Created runtime record");
        Ok(())
    }

    async fn update(&self, record: RuntimeRecord) -> StoreResult<()> {
        let path = self.path_for(&record.filepath)?;
        if !fs::try_exists(&path).await? {
            return Err(StoreError::NotFound(record.filepath));
        }
        self.write(&path, &record).await?;
        tracing::info!(
            filepath = %record.filepath,
            revision = record.meta.revision,
            "Updated runtime record"
        );
        Ok(())
    }
}
