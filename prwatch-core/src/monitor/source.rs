//! Snapshot source abstraction

use async_trait::async_trait;

use crate::review::Snapshot;
use crate::Result;

/// Something that can read the current review state of a pull request
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Get the name of this source
    fn name(&self) -> &'static str;

    /// Fetch a fresh snapshot for the given pull request
    async fn fetch(&self, pr: &str) -> Result<Snapshot>;
}
