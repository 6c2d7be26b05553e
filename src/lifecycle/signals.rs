//! Startup signals.
//!
//! Anything that ends the startup chain early does so with a
//! [`StartupSignal`]. Only `Fatal` is a failure; the other cases are
//! benign early exits raised by whatever detects the condition.

use thiserror::Error;

use crate::config::ConfigError;
use crate::runtime::ReconcileError;
use crate::store::StoreError;

/// A genuine startup failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Why the startup chain stopped before running to completion.
#[derive(Debug)]
pub enum StartupSignal {
    /// This process is a forked worker; the parent owns the rest of startup.
    ForkedProcess,
    /// A one-shot CLI invocation finished its work.
    CliInvocation,
    /// Startup failed.
    Fatal(StartupError),
}

impl StartupSignal {
    /// Whether the signal is a benign early exit.
    pub fn is_benign(&self) -> bool {
        !matches!(self, StartupSignal::Fatal(_))
    }
}

impl std::fmt::Display for StartupSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupSignal::ForkedProcess => write!(f, "leaving startup: process forked"),
            StartupSignal::CliInvocation => write!(f, "leaving startup: CLI invocation"),
            StartupSignal::Fatal(e) => write!(f, "startup failed: {}", e),
        }
    }
}

impl From<StartupError> for StartupSignal {
    fn from(error: StartupError) -> Self {
        StartupSignal::Fatal(error)
    }
}

macro_rules! fatal_from {
    ($($source:ty),*) => {
        $(
            impl From<$source> for StartupSignal {
                fn from(error: $source) -> Self {
                    StartupSignal::Fatal(error.into())
                }
            }
        )*
    };
}

fatal_from!(ConfigError, ReconcileError, StoreError);
