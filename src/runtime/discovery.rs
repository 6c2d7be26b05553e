//! Environment name discovery.
//!
//! Resolution order, first match wins:
//! 1. explicit `e` option
//! 2. a single positional argument
//! 3. the configured environment variables, in order
//!
//! Empty values count as unset.

use std::collections::HashMap;

use serde::Deserialize;

/// Environment variables consulted when no list is configured.
pub const DEFAULT_ENV_VARS: [&str; 2] = ["NODE_ENV", "ENV"];

/// Already-parsed launch options.
///
/// Deserializes from an option object shaped `{ "e": "...", "_": [...] }`;
/// unrelated keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LaunchOptions {
    /// Explicit environment flag.
    #[serde(rename = "e")]
    pub environment: Option<String>,

    /// Positional arguments.
    #[serde(rename = "_")]
    pub positional: Vec<String>,

    /// Run as a one-shot CLI invocation and leave startup early.
    pub cli: bool,
}

impl LaunchOptions {
    pub fn with_environment(environment: impl Into<String>) -> Self {
        Self {
            environment: Some(environment.into()),
            ..Self::default()
        }
    }

    pub fn with_positional<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Source of environment variables for discovery.
#[derive(Debug, Clone, Default)]
pub enum EnvVars {
    /// The live process environment.
    #[default]
    Process,
    /// A fixed set of variables.
    Fixed(HashMap<String, String>),
}

impl EnvVars {
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvVars::Fixed(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Value of `key`, treating empty values as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match self {
            EnvVars::Process => std::env::var(key).ok(),
            EnvVars::Fixed(vars) => vars.get(key).cloned(),
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Discover the environment name from options and the process environment.
///
/// Returns `None` when nothing names an environment.
pub fn get_env(options: Option<&LaunchOptions>) -> Option<String> {
    discover(options, &EnvVars::Process, &DEFAULT_ENV_VARS)
}

/// Discover the environment name from `options`, then `keys` looked up in `vars`.
pub fn discover<K: AsRef<str>>(
    options: Option<&LaunchOptions>,
    vars: &EnvVars,
    keys: &[K],
) -> Option<String> {
    if let Some(options) = options {
        if let Some(env) = options.environment.as_deref().filter(|e| !e.is_empty()) {
            return Some(env.to_string());
        }
        if let [only] = options.positional.as_slice() {
            return Some(only.clone());
        }
    }

    keys.iter().find_map(|key| vars.get(key.as_ref()))
}
