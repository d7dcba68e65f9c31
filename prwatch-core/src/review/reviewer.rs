//! Pending reviewer resolution
//!
//! A requested reviewer is pending until a review authored by a login
//! matching its identifier (case-insensitively) shows up in the snapshot.

use std::collections::HashSet;

use super::Snapshot;

/// First requested reviewer, in request order, that has not submitted a
/// review yet. `None` when every requested reviewer has reviewed or nobody
/// was requested.
pub fn first_pending_reviewer(snapshot: &Snapshot) -> Option<String> {
    let reviewed: HashSet<String> = snapshot
        .reviews
        .iter()
        .map(|r| r.author_login().to_lowercase())
        .filter(|login| !login.is_empty())
        .collect();

    snapshot
        .review_requests
        .iter()
        .map(|request| request.identifier())
        .find(|id| !id.is_empty() && !reviewed.contains(id))
}
