//! Reconciling the discovered environment with the persisted runtime record.

use thiserror::Error;

use crate::runtime::application::{PersistHandle, PersistMode};
use crate::runtime::context::RuntimeContext;
use crate::store::StoreError;

/// Errors raised while reconciling the runtime environment.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The persisted record could not be loaded.
    #[error("failed to load runtime record '{filepath}': {source}")]
    Load {
        filepath: String,
        #[source]
        source: StoreError,
    },
}

/// What reconciliation did to the persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileAction {
    /// No record existed; one was created.
    Created,
    /// The record named a different environment and was rewritten.
    Updated { previous: Option<String> },
    /// The record already matched.
    Unchanged,
}

/// Result of a successful reconciliation.
#[derive(Debug)]
pub struct Reconciliation {
    /// The environment now applied to the context.
    pub environment: String,
    pub action: ReconcileAction,
    /// The store write started for `Created`/`Updated`, if any.
    pub pending: Option<PersistHandle>,
}

impl RuntimeContext {
    /// Bring the persisted runtime record and `config.process.runtime` in
    /// line with the discovered environment.
    ///
    /// Loads the record once. A load failure is returned untouched and
    /// leaves the in-memory runtime as it was.
    pub async fn config_runtime_environment(&mut self) -> Result<Reconciliation, ReconcileError> {
        let target = self.target_environment();
        let filepath = self.settings.record_path.clone();

        let existing = self
            .store
            .load(&filepath)
            .await
            .map_err(|source| ReconcileError::Load {
                filepath: filepath.clone(),
                source,
            })?;

        let (action, pending) = match existing {
            None => {
                self.record = None;
                let pending = self.set_app_running_env(&target, Some(PersistMode::Create));
                (ReconcileAction::Created, pending)
            }
            Some(mut record) => {
                // The load key is authoritative over whatever the document claims.
                record.filepath = filepath.clone();
                let previous = record.environment().map(str::to_string);
                self.record = Some(record);
                if previous.as_deref() == Some(target.as_str()) {
                    (ReconcileAction::Unchanged, None)
                } else {
                    let pending = self.set_app_running_env(&target, Some(PersistMode::Update));
                    (ReconcileAction::Updated { previous }, pending)
                }
            }
        };
        self.set_app_running_env(&target, None);

        tracing::info!(
            environment = %target,
            filepath = %filepath,
            action = ?action,
            "Runtime environment configured"
        );

        Ok(Reconciliation {
            environment: target,
            action,
            pending,
        })
    }
}
