//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the default environment is a usable name
//! - Check the record key stays inside the store root
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ResolverConfig;
use crate::store::is_contained_key;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("runtime.default_environment must not be empty")]
    EmptyDefaultEnvironment,

    #[error("runtime.default_environment '{0}' must not contain whitespace")]
    InvalidDefaultEnvironment(String),

    #[error("runtime.env_vars must name at least one variable")]
    NoEnvVars,

    #[error("runtime.env_vars[{0}] must not be empty")]
    EmptyEnvVar(usize),

    #[error("runtime.record_path '{0}' must be a non-empty relative path without '..'")]
    InvalidRecordPath(String),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Check a configuration, collecting every problem.
pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let default_env = &config.runtime.default_environment;
    if default_env.is_empty() {
        errors.push(ValidationError::EmptyDefaultEnvironment);
    } else if default_env.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidDefaultEnvironment(default_env.clone()));
    }

    if config.runtime.env_vars.is_empty() {
        errors.push(ValidationError::NoEnvVars);
    }
    for (i, name) in config.runtime.env_vars.iter().enumerate() {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyEnvVar(i));
        }
    }

    if !is_contained_key(&config.runtime.record_path) {
        errors.push(ValidationError::InvalidRecordPath(
            config.runtime.record_path.clone(),
        ));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
