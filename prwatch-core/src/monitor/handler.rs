//! Progress callbacks for the monitor loop

use std::time::Duration;

use super::Report;
use crate::review::Snapshot;
use crate::Error;

/// Handler for monitor progress events
pub trait MonitorHandler: Send {
    /// Called once the baseline snapshot has been fetched
    fn on_baseline(&mut self, _snapshot: &Snapshot) {}

    /// Called for each poll that found no new activity
    fn on_idle(&mut self);

    /// Called when a poll failed and was skipped
    fn on_fetch_error(&mut self, _error: &Error) {}

    /// Called when new activity arrived but a requested reviewer has not
    /// reviewed yet
    fn on_reviewer_pending(&mut self, _reviewer: &str) {}

    /// Called when the run completed
    fn on_complete(&mut self, _report: &Report) {}

    /// Called when the time limit ran out
    fn on_timeout(&mut self, _elapsed: Duration) {}
}
