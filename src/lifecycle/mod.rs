//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Reconcile runtime environment → Host stages → CLI exit?
//!
//! Signals (signals.rs):
//!     ForkedProcess / CliInvocation → benign early exit
//!     Fatal(cause) → startup failure
//!
//! Completion (completion.rs):
//!     Signal → resolve(true) or reject(cause), exactly once
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then environment, then host stages
//! - Early exits are typed, never inferred from error text

pub mod completion;
pub mod signals;
pub mod startup;

pub use completion::{complete_initialization, settle};
pub use signals::{StartupError, StartupSignal};
pub use startup::Startup;
