//! Watch command - wait for reviews on a pull request

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use prwatch_core::monitor::EXIT_COMPLETED;
use prwatch_core::{Config, Error, Monitor, MonitorHandler, MonitorSettings, Report, Snapshot};
use prwatch_github::{GhCli, PrTarget};

/// Arguments for watching a pull request
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// The URL or number of the PR to monitor
    #[arg(value_name = "PR_URL_OR_NUMBER", required = true)]
    pub pr: Option<String>,

    /// Polling interval in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Give up after this many seconds (0 or negative waits forever)
    #[arg(long, allow_negative_numbers = true)]
    pub timeout: Option<i64>,

    /// Stop on the first new comment or review instead of waiting for every
    /// requested reviewer
    #[arg(long)]
    pub any_activity: bool,
}

impl WatchArgs {
    /// Execute the watch command, stopping early on Ctrl-C
    pub async fn execute(&self, config: &Config, verbose: bool) -> anyhow::Result<u8> {
        self.watch_until(config, verbose, tokio::signal::ctrl_c()).await
    }

    /// Watch the pull request until it settles or `shutdown` resolves
    ///
    /// Returns the process exit code. Shutdown counts as success and prints
    /// no report; the in-flight gh call is killed.
    pub async fn watch_until<F>(
        &self,
        config: &Config,
        verbose: bool,
        shutdown: F,
    ) -> anyhow::Result<u8>
    where
        F: Future<Output = std::io::Result<()>>,
    {
        let pr = self
            .pr
            .as_deref()
            .context("A pull request URL or number is required")?;
        let target = PrTarget::parse(pr)?;

        let settings = MonitorSettings::from(&config.monitor);
        let source = GhCli::new().with_path(&config.source.gh_path);

        if verbose {
            tracing::info!(
                pr = %target,
                gh_path = %source.gh_path(),
                "Resolved pull request"
            );
        }

        println!("Starting monitoring for PR: {}", pr);
        match settings.timeout {
            Some(limit) => println!(
                "Waiting for reviews (up to {}s)... (Press Ctrl+C to stop)",
                limit.as_secs()
            ),
            None => println!("Waiting for reviews... (Press Ctrl+C to stop)"),
        }

        let monitor = Monitor::new(source, target.to_string(), settings);
        let mut handler = PrintHandler::new(verbose);

        let result = tokio::select! {
            result = monitor.run(&mut handler) => result,
            signal = shutdown => {
                signal.context("Failed to listen for Ctrl-C")?;
                println!("\nMonitoring stopped by user.");
                return Ok(EXIT_COMPLETED);
            }
        };

        let outcome =
            result.with_context(|| format!("Monitoring {} failed", monitor.pr()))?;

        println!("{}", outcome.report().to_json_pretty()?);
        Ok(outcome.exit_code())
    }
}

/// Prints monitor progress to the terminal
///
/// Heartbeat dots and notices go to stdout, fetch errors to stderr.
pub struct PrintHandler {
    /// Whether to show baseline details
    verbose: bool,
}

impl PrintHandler {
    /// Create a new print handler
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl MonitorHandler for PrintHandler {
    fn on_baseline(&mut self, snapshot: &Snapshot) {
        if let Some(url) = &snapshot.url {
            println!(
                "Watching {} ({})",
                url,
                snapshot.state.as_deref().unwrap_or("UNKNOWN")
            );
        }
        if self.verbose {
            println!(
                "Baseline: {} comments, {} reviews, {} review requests",
                snapshot.comments.len(),
                snapshot.reviews.len(),
                snapshot.review_requests.len()
            );
        }
    }

    fn on_idle(&mut self) {
        print!(".");
        let _ = std::io::stdout().flush();
    }

    fn on_fetch_error(&mut self, error: &Error) {
        eprintln!("\nError: {}", error);
    }

    fn on_reviewer_pending(&mut self, reviewer: &str) {
        println!(
            "\nNew activity detected, still waiting for a review from {}",
            reviewer
        );
    }

    fn on_complete(&mut self, report: &Report) {
        println!("\nNew activity detected!");
        if report.all_reviewers_done {
            println!("All requested reviewers have submitted reviews.");
        }
    }

    fn on_timeout(&mut self, elapsed: Duration) {
        println!("\nTimeout reached after {}s.", elapsed.as_secs());
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    use prwatch_core::CliOverrides;

    fn fake_gh(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("gh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn config_for(gh: &Path) -> Config {
        Config::default().with_cli_overrides(CliOverrides {
            interval_secs: Some(1),
            gh_path: Some(gh.display().to_string()),
            ..Default::default()
        })
    }

    fn args(pr: &str) -> WatchArgs {
        WatchArgs {
            pr: Some(pr.to_string()),
            interval: None,
            timeout: None,
            any_activity: false,
        }
    }

    #[tokio::test]
    async fn test_shutdown_stops_without_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let gh = fake_gh(dir.path(), "sleep 30");

        let code = args("12")
            .watch_until(&config_for(&gh), false, std::future::ready(Ok(())))
            .await
            .unwrap();
        assert_eq!(code, EXIT_COMPLETED);
    }

    #[tokio::test]
    async fn test_shutdown_listener_failure_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let gh = fake_gh(dir.path(), "sleep 30");

        let result = args("12")
            .watch_until(
                &config_for(&gh),
                false,
                std::future::ready(Err(std::io::Error::other("no signal handler"))),
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_baseline_failure_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let gh = fake_gh(dir.path(), "echo 'no pull requests found' >&2\nexit 1");

        let err = args("12")
            .watch_until(&config_for(&gh), false, std::future::pending())
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("no pull requests found"));
    }
}
