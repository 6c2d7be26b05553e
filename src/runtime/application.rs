//! Applying an environment name to the running context.

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::runtime::context::RuntimeContext;
use crate::store::{RuntimeRecord, StoreError, StoreResult};

/// Which store write accompanies an environment change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    Update,
    Create,
}

/// A background store write started by [`RuntimeContext::set_app_running_env`].
///
/// Dropping the handle detaches the write; awaiting [`PersistHandle::confirm`]
/// waits for the store's answer.
#[derive(Debug)]
pub struct PersistHandle {
    mode: PersistMode,
    task: PersistTask,
}

#[derive(Debug)]
enum PersistTask {
    Spawned(JoinHandle<StoreResult<()>>),
    /// The write never started.
    NotStarted(StoreError),
}

impl PersistHandle {
    pub fn mode(&self) -> PersistMode {
        self.mode
    }

    /// Whether the write was handed to a runtime.
    pub fn is_started(&self) -> bool {
        matches!(self.task, PersistTask::Spawned(_))
    }

    /// Wait for the store to acknowledge the write.
    pub async fn confirm(self) -> StoreResult<()> {
        match self.task {
            PersistTask::Spawned(task) => match task.await {
                Ok(result) => result,
                Err(e) => Err(StoreError::Unavailable(format!("persist task failed: {}", e))),
            },
            PersistTask::NotStarted(e) => Err(e),
        }
    }
}

impl RuntimeContext {
    /// Set `config.process.runtime` to `env_name`, optionally persisting it.
    ///
    /// The in-memory change is immediate. With a `mode`, the matching store
    /// operation is spawned on the current Tokio runtime and its handle
    /// returned; `None` means there is nothing to await. The write always
    /// targets the configured record path.
    ///
    /// Outside a Tokio runtime nothing is spawned: the handle reports
    /// [`StoreError::Unavailable`] when confirmed.
    pub fn set_app_running_env(
        &mut self,
        env_name: &str,
        mode: Option<PersistMode>,
    ) -> Option<PersistHandle> {
        self.config.process.runtime = Some(env_name.to_string());
        tracing::debug!(environment = %env_name, mode = ?mode, "Applied running environment");

        let mode = mode?;
        let mut record = match (mode, &self.record) {
            (PersistMode::Update, Some(existing)) => existing.with_environment(env_name),
            _ => RuntimeRecord::new(self.settings.record_path.clone(), env_name),
        };
        record.filepath = self.settings.record_path.clone();
        self.record = Some(record.clone());

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(environment = %env_name, mode = ?mode, error = %e, "No runtime to persist environment on");
                let task = PersistTask::NotStarted(StoreError::Unavailable(e.to_string()));
                return Some(PersistHandle { mode, task });
            }
        };

        let store = self.store.clone();
        let task = runtime.spawn(async move {
            let filepath = record.filepath.clone();
            let result = match mode {
                PersistMode::Update => store.update(record).await,
                PersistMode::Create => store.create(record).await,
            };
            if let Err(e) = &result {
                tracing::warn!(filepath = %filepath, mode = ?mode, error = %e, "Failed to persist runtime environment");
            }
            result
        });

        Some(PersistHandle {
            mode,
            task: PersistTask::Spawned(task),
        })
    }
}
