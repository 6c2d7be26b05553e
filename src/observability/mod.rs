//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout via the fmt layer
//! ```

pub mod logging;

pub use logging::init_logging;
