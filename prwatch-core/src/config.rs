//! Configuration management for prwatch
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (PRWATCH_*)
//! 3. Config file (~/.config/prwatch/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// When the monitor considers its job done
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionPolicy {
    /// Finish once new activity arrived and no requested reviewer is pending
    #[default]
    AllReviewers,
    /// Finish on the first new comment or review
    AnyActivity,
}

impl std::fmt::Display for CompletionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionPolicy::AllReviewers => write!(f, "all-reviewers"),
            CompletionPolicy::AnyActivity => write!(f, "any-activity"),
        }
    }
}

/// Polling behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Time between two polls
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Give up after this much polling time; zero disables the limit
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Completion rule
    pub policy: CompletionPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            timeout: Duration::from_secs(1200),
            policy: CompletionPolicy::default(),
        }
    }
}

impl MonitorConfig {
    /// The polling time limit, if one is set
    pub fn timeout_limit(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }
}

/// Where snapshots come from
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the gh executable
    pub gh_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            gh_path: "gh".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Monitor configuration
    pub monitor: MonitorConfig,

    /// Snapshot source configuration
    pub source: SourceConfig,
}

/// Overrides given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Polling interval in seconds
    pub interval_secs: Option<u64>,
    /// Timeout in seconds (0 or negative disables it)
    pub timeout_secs: Option<i64>,
    /// Completion rule
    pub policy: Option<CompletionPolicy>,
    /// Path to the gh executable
    pub gh_path: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/prwatch/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("prwatch").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - PRWATCH_GH_PATH: Path to gh executable
    /// - PRWATCH_INTERVAL: Polling interval in seconds
    /// - PRWATCH_TIMEOUT: Timeout in seconds (0 or negative disables it)
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(gh_path) = lookup("PRWATCH_GH_PATH") {
            self.source.gh_path = gh_path;
        }

        if let Some(interval) = lookup("PRWATCH_INTERVAL") {
            self.monitor.interval = Duration::from_secs(parse_secs("PRWATCH_INTERVAL", &interval)?);
        }

        if let Some(timeout) = lookup("PRWATCH_TIMEOUT") {
            self.monitor.timeout = timeout_from_secs(parse_secs("PRWATCH_TIMEOUT", &timeout)?);
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: CliOverrides) -> Self {
        if let Some(secs) = overrides.interval_secs {
            self.monitor.interval = Duration::from_secs(secs);
        }

        if let Some(secs) = overrides.timeout_secs {
            self.monitor.timeout = timeout_from_secs(secs);
        }

        if let Some(policy) = overrides.policy {
            self.monitor.policy = policy;
        }

        if let Some(path) = overrides.gh_path {
            self.source.gh_path = path;
        }

        self
    }

    /// Check that the configuration can drive a monitor
    pub fn validate(&self) -> Result<()> {
        if self.monitor.interval.is_zero() {
            return Err(Error::Config(
                "interval must be greater than zero".to_string(),
            ));
        }
        if self.source.gh_path.trim().is_empty() {
            return Err(Error::Config("gh_path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(overrides: CliOverrides) -> Result<Self> {
        let config = Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(overrides);
        config.validate()?;
        Ok(config)
    }
}

/// Timeout of `secs` seconds; zero or negative means no limit
fn timeout_from_secs(secs: i64) -> Duration {
    Duration::from_secs(secs.max(0).unsigned_abs())
}

fn parse_secs<T: std::str::FromStr>(var: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::Config(format!(
            "{} must be a whole number of seconds, got '{}'",
            var, value
        ))
    })
}
