//! Snapshot source backed by the GitHub CLI

use std::process::Stdio;

use async_trait::async_trait;
use prwatch_core::{Error, Result, Snapshot, SnapshotSource};
use tokio::process::Command;
use tracing::debug;

use crate::PrTarget;

/// Fields requested from `gh pr view --json`
pub const JSON_FIELDS: &str = "comments,reviews,reviewRequests,state,url";

/// Reads pull request snapshots by running `gh pr view`
///
/// Authentication is whatever `gh` is logged in with.
#[derive(Debug, Clone)]
pub struct GhCli {
    gh_path: String,
}

impl GhCli {
    /// Create a source that runs `gh` from PATH
    pub fn new() -> Self {
        Self {
            gh_path: "gh".to_string(),
        }
    }

    /// Set a custom path to the gh executable
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.gh_path = path.into();
        self
    }

    /// Path to the gh executable
    pub fn gh_path(&self) -> &str {
        &self.gh_path
    }

    /// Build the command that fetches a snapshot of `target`
    pub fn build_command(&self, target: &PrTarget) -> Command {
        let mut cmd = Command::new(&self.gh_path);
        cmd.arg("pr")
            .arg("view")
            .args(target.gh_args())
            .arg("--json")
            .arg(JSON_FIELDS)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotSource for GhCli {
    fn name(&self) -> &'static str {
        "gh"
    }

    async fn fetch(&self, pr: &str) -> Result<Snapshot> {
        let target = PrTarget::parse(pr)?;
        debug!(pr = %target, gh = %self.gh_path, "Running gh pr view");

        let output = self.build_command(&target).output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Fetch(format!(
                    "gh executable not found at '{}'. Is the GitHub CLI installed?",
                    self.gh_path
                ))
            } else {
                Error::Io(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("gh exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(Error::Fetch(message));
        }

        Snapshot::from_json(&String::from_utf8_lossy(&output.stdout))
    }
}
