//! prwatch CLI - wait for reviews on a pull request
//!
//! Polls a pull request through the GitHub CLI until new comments or reviews
//! arrive and every requested reviewer has weighed in.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use prwatch_core::monitor::{EXIT_COMPLETED, EXIT_FAILED};
use prwatch_core::{CliOverrides, CompletionPolicy, Config};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::WatchArgs;

/// prwatch: Wait for pull request reviews
#[derive(Parser, Debug)]
#[command(name = "prwatch")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to gh executable (overrides config and env)
    #[arg(long, global = true, env = "PRWATCH_GH_PATH")]
    gh_path: Option<String>,

    #[command(flatten)]
    watch: WatchArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for progress and the report
    let default_level = if cli.verbose { "debug" } else { "error" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    ExitCode::from(exit_status(run(cli).await))
}

/// Map the outcome of a run to the process exit code, reporting failures
fn exit_status(result: anyhow::Result<u8>) -> u8 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "prwatch failed");
            eprintln!("Error: {:#}", e);
            EXIT_FAILED
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(CliOverrides {
        interval_secs: cli.watch.interval,
        timeout_secs: cli.watch.timeout,
        policy: cli.watch.any_activity.then_some(CompletionPolicy::AnyActivity),
        gh_path: cli.gh_path.clone(),
    })?;

    if cli.verbose {
        tracing::info!(
            interval = ?config.monitor.interval,
            timeout = ?config.monitor.timeout,
            policy = %config.monitor.policy,
            gh_path = %config.source.gh_path,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Config) => {
            println!("prwatch Configuration");
            println!("=====================");
            println!();
            println!("Monitor Settings:");
            println!("  interval: {}s", config.monitor.interval.as_secs());
            match config.monitor.timeout_limit() {
                Some(limit) => println!("  timeout: {}s", limit.as_secs()),
                None => println!("  timeout: (disabled)"),
            }
            println!("  policy: {}", config.monitor.policy);
            println!();
            println!("Source Settings:");
            println!("  gh_path: {}", config.source.gh_path);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
            Ok(EXIT_COMPLETED)
        }
        None => cli.watch.execute(&config, cli.verbose).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_watch_args() {
        let cli = Cli::try_parse_from([
            "prwatch",
            "https://github.com/owner/repo/pull/5",
            "--interval",
            "5",
            "--timeout",
            "0",
            "--any-activity",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(
            cli.watch.pr.as_deref(),
            Some("https://github.com/owner/repo/pull/5")
        );
        assert_eq!(cli.watch.interval, Some(5));
        assert_eq!(cli.watch.timeout, Some(0));
        assert!(cli.watch.any_activity);
    }

    #[test]
    fn test_negative_timeout_accepted() {
        let cli = Cli::try_parse_from(["prwatch", "12", "--timeout", "-1"]).unwrap();
        assert_eq!(cli.watch.pr.as_deref(), Some("12"));
        assert_eq!(cli.watch.timeout, Some(-1));

        let config = Config::default().with_cli_overrides(CliOverrides {
            timeout_secs: cli.watch.timeout,
            ..Default::default()
        });
        assert_eq!(config.monitor.timeout_limit(), None);
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(Ok(2)), 2);
        assert_eq!(exit_status(Err(anyhow::anyhow!("boom"))), EXIT_FAILED);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_baseline_fetch_failure_exits_failed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let gh = dir.path().join("gh");
        std::fs::write(&gh, "#!/bin/sh\necho 'could not resolve to a PullRequest' >&2\nexit 1\n")
            .unwrap();
        std::fs::set_permissions(&gh, std::fs::Permissions::from_mode(0o755)).unwrap();

        let cli = Cli::try_parse_from(["prwatch", "12", "--timeout", "5"]).unwrap();
        let config = Config::default().with_cli_overrides(CliOverrides {
            timeout_secs: cli.watch.timeout,
            gh_path: Some(gh.display().to_string()),
            ..Default::default()
        });

        let result = cli.watch.execute(&config, false).await;
        assert!(result.is_err());
        assert_eq!(exit_status(result), EXIT_FAILED);
    }

    #[test]
    fn test_pr_required_without_subcommand() {
        assert!(Cli::try_parse_from(["prwatch"]).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Cli::try_parse_from(["prwatch", "12", "--interval", "0"]).is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["prwatch", "config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config)));
        assert!(cli.watch.pr.is_none());
    }
}
