//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use runtime_resolver::config::RuntimeSettings;
use runtime_resolver::runtime::{EnvVars, RuntimeContext};
use runtime_resolver::store::{
    ConfigurationStore, RuntimeRecord, StoreError, StoreResult, StoredDocument,
};

/// How the spy store answers `load`.
#[allow(dead_code)]
pub enum LoadBehavior {
    Returns(Option<StoredDocument>),
    Fails(&'static str),
}

/// A store that counts every call, like a test spy.
pub struct SpyStore {
    behavior: LoadBehavior,
    pub loads: AtomicUsize,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
    pub written: Mutex<Vec<RuntimeRecord>>,
}

#[allow(dead_code)]
impl SpyStore {
    pub fn new(behavior: LoadBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            loads: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            written: Mutex::new(Vec::new()),
        })
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn last_written(&self) -> Option<RuntimeRecord> {
        self.written.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ConfigurationStore for SpyStore {
    async fn load_document(&self, _filepath: &str) -> StoreResult<Option<StoredDocument>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            LoadBehavior::Returns(document) => Ok(document.clone()),
            LoadBehavior::Fails(reason) => Err(StoreError::Unavailable(reason.to_string())),
        }
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

/// A context that sees no environment variables.
pub fn isolated_context(store: Arc<dyn ConfigurationStore>) -> RuntimeContext {
    RuntimeContext::new(RuntimeSettings::default(), store)
        .with_env_vars(EnvVars::fixed(Vec::<(String, String)>::new()))
}
