//! Runtime environment resolver
//!
//! Decides which environment a server process runs under, records the
//! choice in the configuration store and settles the startup chain.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ cli ──▶ LaunchOptions ─┐
//!                                   ▼
//!   env vars ───────────────▶ runtime::discovery ──▶ target environment
//!                                                          │
//!                                                          ▼
//!   store (file / memory) ◀──── runtime::reconcile ◀───────┘
//!                                   │
//!                                   ▼
//!                        lifecycle::startup ──▶ lifecycle::completion
//!                                                 resolve(true) / reject
//! ```

use std::process::ExitCode;

use clap::Parser;

use runtime_resolver::cli::Cli;
use runtime_resolver::config::loader::load_or_default;
use runtime_resolver::lifecycle::{settle, Startup, StartupSignal};
use runtime_resolver::observability::init_logging;
use runtime_resolver::runtime::LaunchOptions;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(root) = &cli.store_root {
        config.store.root = root.clone();
    }

    init_logging(&config.observability)?;

    tracing::info!(
        record_path = %config.runtime.record_path,
        store_backend = ?config.store.backend,
        store_root = %config.store.root,
        "Configuration loaded"
    );

    let mut startup = Startup::from_config(&config, LaunchOptions::from(&cli));
    let outcome = startup.run().await;

    if matches!(outcome, Err(StartupSignal::CliInvocation)) {
        if let Some(environment) = startup.context().runtime() {
            println!("{}", environment);
        }
    }

    match settle(outcome) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
