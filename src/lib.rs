//! Runtime environment resolver for server startup.

pub mod cli;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod runtime;
pub mod store;

pub use config::schema::ResolverConfig;
pub use lifecycle::{Startup, StartupError, StartupSignal};
pub use runtime::RuntimeContext;
