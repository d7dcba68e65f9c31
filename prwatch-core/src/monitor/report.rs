//! Final report document

use serde::Serialize;

use crate::review::{first_pending_reviewer, Baseline, Comment, Review, Snapshot};
use crate::Result;

/// Summary printed when monitoring ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Comments added since the baseline
    pub new_comments: Vec<Comment>,
    /// Reviews added since the baseline
    pub new_reviews: Vec<Review>,
    pub total_comments: usize,
    pub total_reviews: usize,
    /// No requested reviewer is pending
    pub all_reviewers_done: bool,
    /// Set when the run ended because the time limit ran out
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub timeout: bool,
    /// First requested reviewer without a review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_reviewer: Option<String>,
}

impl Report {
    /// Build a report of what changed between the baseline and `snapshot`
    pub fn build(baseline: &Baseline, snapshot: &Snapshot, timeout: bool) -> Self {
        let pending_reviewer = first_pending_reviewer(snapshot);
        Self {
            new_comments: baseline.new_comments(snapshot).to_vec(),
            new_reviews: baseline.new_reviews(snapshot).to_vec(),
            total_comments: snapshot.comments.len(),
            total_reviews: snapshot.reviews.len(),
            all_reviewers_done: pending_reviewer.is_none(),
            timeout,
            pending_reviewer,
        }
    }

    /// Pretty-printed JSON form
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
