//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the runtime context from validated configuration
//! - Reconcile the runtime environment with the persisted record
//! - Run host-supplied stages that may leave the chain early
//! - Leave early for one-shot CLI invocations
//!
//! # Design Decisions
//! - Fail fast: any fatal error ends the chain
//! - Stages run in order, not concurrently
//! - Early exits travel as `StartupSignal`, settled by `completion.rs`

use crate::config::ResolverConfig;
use crate::lifecycle::signals::StartupSignal;
use crate::runtime::{LaunchOptions, ReconcileAction, RuntimeContext};
use crate::store::open_store;

type Stage = Box<dyn FnOnce(&RuntimeContext) -> Result<(), StartupSignal> + Send>;

/// The startup chain for one process.
pub struct Startup {
    ctx: RuntimeContext,
    stages: Vec<Stage>,
}

impl Startup {
    pub fn new(ctx: RuntimeContext) -> Self {
        Self {
            ctx,
            stages: Vec::new(),
        }
    }

    /// Build a chain from loaded configuration and parsed launch options.
    pub fn from_config(config: &ResolverConfig, options: LaunchOptions) -> Self {
        let store = open_store(&config.store);
        let ctx = RuntimeContext::new(config.runtime.clone(), store).with_options(options);
        Self::new(ctx)
    }

    /// Append a stage that runs after the environment is reconciled.
    pub fn with_stage<F>(mut self, stage: F) -> Self
    where
        F: FnOnce(&RuntimeContext) -> Result<(), StartupSignal> + Send + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn context(&self) -> &RuntimeContext {
        &self.ctx
    }

    pub fn into_context(self) -> RuntimeContext {
        self.ctx
    }

    /// Run the chain once.
    pub async fn run(&mut self) -> Result<(), StartupSignal> {
        let reconciliation = self.ctx.config_runtime_environment().await?;

        if let Some(pending) = reconciliation.pending {
            // Failures are already logged by the persist task.
            if pending.confirm().await.is_ok() {
                tracing::debug!(action = ?reconciliation.action, "Runtime record persisted");
            }
        } else if reconciliation.action == ReconcileAction::Unchanged {
            tracing::debug!("Runtime record already up to date");
        }

        for stage in self.stages.drain(..) {
            stage(&self.ctx)?;
        }

        if self.ctx.options().cli {
            return Err(StartupSignal::CliInvocation);
        }

        tracing::info!(environment = ?self.ctx.runtime(), "Startup complete");
        Ok(())
    }
}
