//! prwatch core - review tracking for a single pull request
//!
//! This crate provides the data model for pull request review activity, the
//! pending reviewer rule, and the polling loop that waits for reviews.

pub mod config;
pub mod error;
pub mod monitor;
pub mod review;

pub use config::{CliOverrides, CompletionPolicy, Config, MonitorConfig, SourceConfig};
pub use error::{Error, Result};
pub use monitor::{Monitor, MonitorHandler, MonitorSettings, Outcome, Report, SnapshotSource};
pub use review::{first_pending_reviewer, Baseline, ReviewRequest, Snapshot};
