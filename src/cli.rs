//! Command-line surface of the resolver binary.

use std::path::PathBuf;

use clap::Parser;

use crate::runtime::LaunchOptions;

#[derive(Debug, Parser)]
#[command(name = "runtime-resolver")]
#[command(about = "Resolve and persist the runtime environment for a server process", long_about = None)]
pub struct Cli {
    /// Environment to run under
    #[arg(short = 'e', long = "environment")]
    pub environment: Option<String>,

    /// Settings file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the store root directory
    #[arg(long)]
    pub store_root: Option<String>,

    /// Print the resolved environment and exit
    #[arg(long)]
    pub cli: bool,

    /// Positional arguments; a single one names the environment
    pub args: Vec<String>,
}

impl From<&Cli> for LaunchOptions {
    fn from(cli: &Cli) -> Self {
        LaunchOptions {
            environment: cli.environment.clone(),
            positional: cli.args.clone(),
            cli: cli.cli,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::discovery::{discover, EnvVars, DEFAULT_ENV_VARS};

    fn no_vars() -> EnvVars {
        EnvVars::fixed(Vec::<(String, String)>::new())
    }

    #[test]
    fn test_flag() {
        let cli = Cli::parse_from(["runtime-resolver", "-e", "production"]);
        let options = LaunchOptions::from(&cli);
        assert_eq!(discover(Some(&options), &no_vars(), &DEFAULT_ENV_VARS).as_deref(), Some("production"));
    }

    #[test]
    fn test_positional() {
        let cli = Cli::parse_from(["runtime-resolver", "staging"]);
        let options = LaunchOptions::from(&cli);
        assert_eq!(options.positional, vec!["staging"]);
        assert_eq!(discover(Some(&options), &no_vars(), &DEFAULT_ENV_VARS).as_deref(), Some("staging"));

        let cli = Cli::parse_from(["runtime-resolver", "a", "b"]);
        assert_eq!(discover(Some(&LaunchOptions::from(&cli)), &no_vars(), &DEFAULT_ENV_VARS), None);
    }

    #[test]
    fn test_cli_mode_and_paths() {
        let cli = Cli::parse_from([
            "runtime-resolver",
            "--cli",
            "--config",
            "resolver.toml",
            "--store-root",
            "/var/lib/app",
        ]);
        assert!(cli.cli);
        assert_eq!(cli.config, Some(PathBuf::from("resolver.toml")));
        assert_eq!(cli.store_root.as_deref(), Some("/var/lib/app"));
        assert!(LaunchOptions::from(&cli).cli);
    }
}
