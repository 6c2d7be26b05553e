//! Runtime environment resolution.
//!
//! # Data Flow
//! ```text
//! LaunchOptions + env vars
//!     → discovery.rs (environment name or nothing)
//!     → context.rs (fallback: legacy field, then configured default)
//!     → reconcile.rs (load persisted record, compare)
//!     → application.rs (set process.runtime, spawn create/update)
//! ```
//!
//! # Design Decisions
//! - Discovery is pure given its inputs; env vars are injectable
//! - Store writes run in the background and hand back a handle
//! - Exactly one load per reconciliation, no retries

pub mod application;
pub mod context;
pub mod discovery;
pub mod reconcile;

pub use application::{PersistHandle, PersistMode};
pub use context::{AppConfig, ProcessConfig, RuntimeContext};
pub use discovery::{discover, get_env, EnvVars, LaunchOptions};
pub use reconcile::{ReconcileAction, ReconcileError, Reconciliation};
