//! Settling the startup chain.

use std::cell::RefCell;

use crate::lifecycle::signals::{StartupError, StartupSignal};

/// Settle the startup chain exactly once.
///
/// Benign early exits log at info and resolve `true`; a fatal signal logs
/// at error and rejects with its cause. No signal resolves `true` silently.
pub fn complete_initialization<R, J>(resolve: R, reject: J, signal: Option<StartupSignal>)
where
    R: FnOnce(bool),
    J: FnOnce(StartupError),
{
    match signal {
        None => resolve(true),
        Some(StartupSignal::ForkedProcess) => {
            tracing::info!("Leaving startup chain: process forked");
            resolve(true)
        }
        Some(StartupSignal::CliInvocation) => {
            tracing::info!("Leaving startup chain: CLI process");
            resolve(true)
        }
        Some(StartupSignal::Fatal(error)) => {
            tracing::error!(error = %error, "Startup failed");
            reject(error)
        }
    }
}

/// Collapse a startup outcome into its settled value.
pub fn settle(outcome: Result<(), StartupSignal>) -> Result<bool, StartupError> {
    let settled = RefCell::new(None);
    complete_initialization(
        |ready| *settled.borrow_mut() = Some(Ok(ready)),
        |error| *settled.borrow_mut() = Some(Err(error)),
        outcome.err(),
    );
    settled.into_inner().unwrap_or(Ok(true))
}
