//! Review module for pull request review activity
//!
//! This module models what the review host reports about a pull request
//! (comments, reviews, requested reviewers) and the rules for deciding
//! whether new activity arrived and who is still expected to review.

pub mod request;
pub mod reviewer;
pub mod snapshot;

pub use request::ReviewRequest;
pub use reviewer::first_pending_reviewer;
pub use snapshot::{Author, Baseline, Comment, Review, Snapshot};
