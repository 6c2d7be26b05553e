//! Configuration schema definitions.
//!
//! This module defines the complete settings structure for the resolver.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Well-known store key of the persisted runtime record.
pub const DEFAULT_RECORD_PATH: &str = "content/config/process/runtime.json";

/// Root configuration for the runtime resolver.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResolverConfig {
    /// Environment discovery and reconciliation settings.
    pub runtime: RuntimeSettings,

    /// Persistence store settings.
    pub store: StoreSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Environment discovery and reconciliation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Environment used when neither options, env vars nor the host config name one.
    pub default_environment: String,

    /// Environment variables consulted by discovery, in priority order.
    pub env_vars: Vec<String>,

    /// Store key of the persisted runtime record.
    pub record_path: String,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            default_environment: "development".to_string(),
            env_vars: vec!["NODE_ENV".to_string(), "ENV".to_string()],
            record_path: DEFAULT_RECORD_PATH.to_string(),
        }
    }
}

/// Which persistence store backs the runtime record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// JSON documents on disk under `root`.
    #[default]
    File,
    /// Process-local map; nothing survives a restart.
    Memory,
}

/// Persistence store settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,

    /// Directory that record keys are resolved against (file backend only).
    pub root: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::File,
            root: ".".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
