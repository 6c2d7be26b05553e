//! Persisted runtime record and the document normalization boundary.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{StoreError, StoreResult};

/// The persisted runtime document, in canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeRecord {
    /// Store key the record lives under.
    pub filepath: String,

    #[serde(default)]
    pub config: RecordConfig,

    /// Store-assigned identifier. Driver documents carry it as `_id`.
    #[serde(alias = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub meta: RecordMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordConfig {
    pub process: RecordProcess,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordProcess {
    pub environment: Option<String>,
}

/// Revision bookkeeping. Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordMeta {
    pub revision: u64,
    pub created: u64,
    pub version: u64,
    pub updated: u64,
}

impl RuntimeRecord {
    /// A fresh record for `environment`, with a new id and revision 0.
    pub fn new(filepath: impl Into<String>, environment: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            filepath: filepath.into(),
            config: RecordConfig {
                process: RecordProcess {
                    environment: Some(environment.into()),
                },
            },
            id: uuid::Uuid::new_v4().to_string(),
            meta: RecordMeta {
                revision: 0,
                created: now,
                version: 0,
                updated: now,
            },
        }
    }

    /// The stored environment name, if any.
    pub fn environment(&self) -> Option<&str> {
        self.config.process.environment.as_deref()
    }

    /// The next revision of this record carrying `environment`.
    ///
    /// Keeps the id and creation time.
    pub fn with_environment(&self, environment: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.config.process.environment = Some(environment.into());
        next.meta.revision = self.meta.revision.saturating_add(1);
        next.meta.updated = now_millis().max(self.meta.updated);
        next
    }
}

/// A document as a store hands it back.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredDocument {
    /// Untyped document straight from a driver (may carry `_id`, `$loki`, ...).
    Raw(Value),
    /// Already in canonical shape.
    Record(RuntimeRecord),
}

impl StoredDocument {
    /// Convert to the canonical record. `null` raw documents are absent.
    pub fn normalize(self) -> StoreResult<Option<RuntimeRecord>> {
        match self {
            StoredDocument::Record(record) => Ok(Some(record)),
            StoredDocument::Raw(Value::Null) => Ok(None),
            StoredDocument::Raw(value @ Value::Object(_)) => {
                let filepath = value
                    .get("filepath")
                    .and_then(Value::as_str)
                    .unwrap_or("<unknown>")
                    .to_string();
                serde_json::from_value(value)
                    .map(Some)
                    .map_err(|e| StoreError::Malformed {
                        filepath,
                        reason: e.to_string(),
                    })
            }
            StoredDocument::Raw(other) => Err(StoreError::Malformed {
                filepath: "<unknown>".to_string(),
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }
}

impl From<RuntimeRecord> for StoredDocument {
    fn from(record: RuntimeRecord) -> Self {
        StoredDocument::Record(record)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
