//! The host-owned runtime context.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::RuntimeSettings;
use crate::runtime::discovery::{discover, EnvVars, LaunchOptions};
use crate::store::{ConfigurationStore, RuntimeRecord};

/// In-memory application configuration mutated during startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub process: ProcessConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// The active environment name.
    pub runtime: Option<String>,

    /// Legacy environment field, used as a fallback target.
    pub environment: Option<String>,
}

/// Startup state shared by discovery, application and reconciliation.
///
/// Created once at process start and lives for the process lifetime.
pub struct RuntimeContext {
    pub config: AppConfig,
    pub(crate) settings: RuntimeSettings,
    pub(crate) options: LaunchOptions,
    pub(crate) env_vars: EnvVars,
    pub(crate) store: Arc<dyn ConfigurationStore>,
    /// Last persisted record seen or written by this context.
    pub(crate) record: Option<RuntimeRecord>,
}

impl RuntimeContext {
    pub fn new(settings: RuntimeSettings, store: Arc<dyn ConfigurationStore>) -> Self {
        Self {
            config: AppConfig::default(),
            settings,
            options: LaunchOptions::default(),
            env_vars: EnvVars::Process,
            store,
            record: None,
        }
    }

    pub fn with_options(mut self, options: LaunchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_env_vars(mut self, env_vars: EnvVars) -> Self {
        self.env_vars = env_vars;
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// The active environment name, once applied.
    pub fn runtime(&self) -> Option<&str> {
        self.config.process.runtime.as_deref()
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    /// The last persisted record this context has seen or written.
    pub fn record(&self) -> Option<&RuntimeRecord> {
        self.record.as_ref()
    }

    /// Environment the process should run under.
    ///
    /// Discovery first, then the legacy `process.environment` field, then the
    /// configured default.
    pub fn target_environment(&self) -> String {
        discover(
            Some(&self.options),
            &self.env_vars,
            self.settings.env_vars.as_slice(),
        )
        .or_else(|| {
            self.config
                .process
                .environment
                .clone()
                .filter(|e| !e.is_empty())
        })
        .unwrap_or_else(|| self.settings.default_environment.clone())
    }
}

impl std::fmt::Debug for RuntimeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeContext")
            .field("config", &self.config)
            .field("settings", &self.settings)
            .field("options", &self.options)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}
