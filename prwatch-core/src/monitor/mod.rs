//! Monitor loop that waits for pull request reviews
//!
//! The monitor takes a baseline snapshot, then polls the source at a fixed
//! interval until new activity completes the run or the time limit runs out.
//! Progress is reported through a [`MonitorHandler`]; the loop itself never
//! writes to the terminal.

mod handler;
mod report;
mod source;

use std::time::Duration;

use tracing::{debug, info, warn};

pub use handler::MonitorHandler;
pub use report::Report;
pub use source::SnapshotSource;

use crate::config::{CompletionPolicy, MonitorConfig};
use crate::review::{first_pending_reviewer, Baseline};
use crate::Result;

/// Exit code for a completed run
pub const EXIT_COMPLETED: u8 = 0;
/// Exit code when the baseline could not be fetched or the run failed
pub const EXIT_FAILED: u8 = 1;
/// Exit code when the time limit ran out
pub const EXIT_TIMED_OUT: u8 = 2;

/// How a monitor run ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// New activity arrived and the completion policy was satisfied
    Completed(Report),
    /// The time limit ran out first
    TimedOut(Report),
}

impl Outcome {
    /// The report for this outcome
    pub fn report(&self) -> &Report {
        match self {
            Outcome::Completed(report) | Outcome::TimedOut(report) => report,
        }
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Completed(_) => EXIT_COMPLETED,
            Outcome::TimedOut(_) => EXIT_TIMED_OUT,
        }
    }
}

/// Polling parameters for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Time between two polls
    pub interval: Duration,
    /// Polling time limit, `None` to poll until done
    pub timeout: Option<Duration>,
    /// Completion rule
    pub policy: CompletionPolicy,
}

impl MonitorSettings {
    fn within_limit(&self, elapsed: Duration) -> bool {
        match self.timeout {
            Some(limit) => elapsed < limit,
            None => true,
        }
    }
}

impl From<&MonitorConfig> for MonitorSettings {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            interval: config.interval,
            timeout: config.timeout_limit(),
            policy: config.policy,
        }
    }
}

/// Watches a single pull request for review activity
pub struct Monitor<S> {
    source: S,
    pr: String,
    settings: MonitorSettings,
}

impl<S: SnapshotSource> Monitor<S> {
    /// Create a monitor for `pr` reading from `source`
    pub fn new(source: S, pr: impl Into<String>, settings: MonitorSettings) -> Self {
        Self {
            source,
            pr: pr.into(),
            settings,
        }
    }

    /// The pull request being watched
    pub fn pr(&self) -> &str {
        &self.pr
    }

    /// Get the underlying snapshot source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run until completion or timeout
    ///
    /// Fails immediately if the baseline cannot be fetched. Transient fetch
    /// errors while polling skip the tick; any other error ends the run
    /// without a report.
    pub async fn run(&self, handler: &mut dyn MonitorHandler) -> Result<Outcome> {
        info!(
            pr = %self.pr,
            source = self.source.name(),
            interval = ?self.settings.interval,
            timeout = ?self.settings.timeout,
            policy = %self.settings.policy,
            "Starting monitor"
        );

        let mut latest = self.source.fetch(&self.pr).await?;
        let baseline = Baseline::capture(&latest);
        debug!(
            comments = baseline.comments,
            reviews = baseline.reviews,
            "Captured baseline"
        );
        handler.on_baseline(&latest);

        let interval = self.settings.interval;
        let mut elapsed = Duration::ZERO;
        let mut tick = 0u64;

        while self.settings.within_limit(elapsed) {
            tokio::time::sleep(interval).await;
            elapsed += interval;
            tick += 1;

            debug!(tick, "Polling");
            let snapshot = match self.source.fetch(&self.pr).await {
                Ok(snapshot) => snapshot,
                Err(e) if e.is_transient() => {
                    warn!(tick, error = %e, "Fetch failed, skipping tick");
                    handler.on_fetch_error(&e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !baseline.has_new_activity(&snapshot) {
                handler.on_idle();
                latest = snapshot;
                continue;
            }

            if self.settings.policy == CompletionPolicy::AllReviewers {
                if let Some(reviewer) = first_pending_reviewer(&snapshot) {
                    debug!(tick, reviewer = %reviewer, "Activity detected, reviewer still pending");
                    handler.on_reviewer_pending(&reviewer);
                    latest = snapshot;
                    continue;
                }
            }

            let report = Report::build(&baseline, &snapshot, false);
            info!(
                tick,
                new_comments = report.new_comments.len(),
                new_reviews = report.new_reviews.len(),
                "Monitoring complete"
            );
            handler.on_complete(&report);
            return Ok(Outcome::Completed(report));
        }

        info!(elapsed = ?elapsed, "Timeout reached");
        handler.on_timeout(elapsed);

        let last = match self.source.fetch(&self.pr).await {
            Ok(snapshot) => snapshot,
            Err(e) if e.is_transient() => {
                warn!(error = %e, "Final fetch failed, reporting last known state");
                handler.on_fetch_error(&e);
                latest
            }
            Err(e) => return Err(e),
        };

        Ok(Outcome::TimedOut(Report::build(&baseline, &last, true)))
    }
}

impl<S> std::fmt::Debug for Monitor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("pr", &self.pr)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
