//! Point-in-time view of a pull request's review activity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ReviewRequest;
use crate::Result;

/// The account that wrote a comment or review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Login name
    #[serde(default)]
    pub login: String,
}

/// A conversation comment on a pull request
///
/// Fields the source reports beyond the ones modelled here are kept in
/// `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment author (absent for deleted accounts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Comment body
    #[serde(default)]
    pub body: String,
    /// When the comment was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A submitted pull request review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review author (absent for deleted accounts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Review state (APPROVED, CHANGES_REQUESTED, COMMENTED, ...)
    #[serde(default)]
    pub state: String,
    /// Review summary
    #[serde(default)]
    pub body: String,
    /// When the review was submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Review {
    /// Login of the review author, or an empty string if unknown
    pub fn author_login(&self) -> &str {
        self.author.as_ref().map(|a| a.login.as_str()).unwrap_or("")
    }
}

/// Comments, reviews and outstanding review requests of a pull request at
/// the moment it was fetched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    pub comments: Vec<Comment>,
    pub reviews: Vec<Review>,
    pub review_requests: Vec<ReviewRequest>,
    /// PR state as reported by the source (OPEN, CLOSED, MERGED)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Snapshot {
    /// Parse a snapshot from the source's JSON output
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Comment and review counts captured when monitoring starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub comments: usize,
    pub reviews: usize,
}

impl Baseline {
    /// Record the counts of the given snapshot
    pub fn capture(snapshot: &Snapshot) -> Self {
        Self {
            comments: snapshot.comments.len(),
            reviews: snapshot.reviews.len(),
        }
    }

    /// Whether the snapshot holds more comments or reviews than the baseline
    pub fn has_new_activity(&self, snapshot: &Snapshot) -> bool {
        snapshot.comments.len() > self.comments || snapshot.reviews.len() > self.reviews
    }

    /// Comments added after the baseline was taken
    pub fn new_comments<'a>(&self, snapshot: &'a Snapshot) -> &'a [Comment] {
        snapshot.comments.get(self.comments..).unwrap_or(&[])
    }

    /// Reviews added after the baseline was taken
    pub fn new_reviews<'a>(&self, snapshot: &'a Snapshot) -> &'a [Review] {
        snapshot.reviews.get(self.reviews..).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(comments: usize, reviews: usize) -> Snapshot {
        Snapshot {
            comments: (0..comments)
                .map(|i| Comment {
                    body: format!("comment {}", i),
                    ..Default::default()
                })
                .collect(),
            reviews: (0..reviews)
                .map(|i| Review {
                    body: format!("review {}", i),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_gh_output() {
        let json = r#"{
            "comments": [
                {
                    "id": "IC_kwDOA",
                    "author": {"login": "alice"},
                    "authorAssociation": "MEMBER",
                    "body": "Looks good",
                    "createdAt": "2024-05-01T10:00:00Z"
                }
            ],
            "reviews": [
                {
                    "author": {"login": "bob"},
                    "body": "",
                    "state": "APPROVED",
                    "submittedAt": "2024-05-01T11:00:00Z"
                }
            ],
            "reviewRequests": [
                {"__typename": "User", "login": "carol"},
                {"__typename": "Team", "name": "Core", "slug": "core"}
            ],
            "state": "OPEN",
            "url": "https://github.com/owner/repo/pull/7"
        }"#;

        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.comments.len(), 1);
        assert_eq!(snapshot.comments[0].body, "Looks good");
        assert_eq!(
            snapshot.comments[0].extra.get("authorAssociation"),
            Some(&Value::String("MEMBER".to_string()))
        );
        assert_eq!(snapshot.reviews[0].author_login(), "bob");
        assert_eq!(snapshot.reviews[0].state, "APPROVED");
        assert_eq!(snapshot.review_requests.len(), 2);
        assert_eq!(snapshot.state.as_deref(), Some("OPEN"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let snapshot = Snapshot::from_json(r#"{"state": "OPEN"}"#).unwrap();
        assert!(snapshot.comments.is_empty());
        assert!(snapshot.reviews.is_empty());
        assert!(snapshot.review_requests.is_empty());
        assert!(snapshot.url.is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Snapshot::from_json("not json").is_err());
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let json = r#"{"author": {"login": "alice"}, "body": "hi", "url": "https://example.com/c/1"}"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value["url"], "https://example.com/c/1");
        assert_eq!(value["author"]["login"], "alice");
    }

    #[test]
    fn test_review_without_author() {
        let review: Review = serde_json::from_str(r#"{"state": "COMMENTED"}"#).unwrap();
        assert_eq!(review.author_login(), "");
    }

    #[test]
    fn test_new_activity_detection() {
        let baseline = Baseline::capture(&snapshot_with(2, 1));
        assert!(!baseline.has_new_activity(&snapshot_with(2, 1)));
        assert!(baseline.has_new_activity(&snapshot_with(3, 1)));
        assert!(baseline.has_new_activity(&snapshot_with(2, 2)));
        assert!(baseline.has_new_activity(&snapshot_with(5, 4)));
    }

    #[test]
    fn test_new_slices_start_after_baseline() {
        let baseline = Baseline::capture(&snapshot_with(2, 1));
        let current = snapshot_with(4, 2);

        let comments = baseline.new_comments(&current);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].body, "comment 2");
        assert_eq!(comments[1].body, "comment 3");

        let reviews = baseline.new_reviews(&current);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].body, "review 1");
    }

    #[test]
    fn test_shrinking_source_yields_no_activity() {
        let baseline = Baseline::capture(&snapshot_with(3, 3));
        let current = snapshot_with(1, 0);
        assert!(!baseline.has_new_activity(&current));
        assert!(baseline.new_comments(&current).is_empty());
        assert!(baseline.new_reviews(&current).is_empty());
    }
}
