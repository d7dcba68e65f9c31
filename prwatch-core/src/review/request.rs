//! Requested reviewers

use serde::{Deserialize, Serialize};

/// A user or team asked to review a pull request
///
/// Users carry a `login`, teams a `slug` and `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ReviewRequest {
    /// Request addressed to a user
    pub fn user(login: impl Into<String>) -> Self {
        Self {
            login: Some(login.into()),
            ..Default::default()
        }
    }

    /// Request addressed to a team
    pub fn team(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            ..Default::default()
        }
    }

    /// Lower-cased identity of the requested reviewer: login, else team
    /// slug, else display name. Empty when none of them is set.
    pub fn identifier(&self) -> String {
        [&self.login, &self.slug, &self.name]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_prefers_login() {
        let request = ReviewRequest {
            login: Some("Alice".to_string()),
            slug: Some("team-x".to_string()),
            name: Some("Team X".to_string()),
        };
        assert_eq!(request.identifier(), "alice");
    }

    #[test]
    fn test_identifier_skips_empty_fields() {
        let request = ReviewRequest {
            login: Some(String::new()),
            slug: None,
            name: Some("Core Maintainers".to_string()),
        };
        assert_eq!(request.identifier(), "core maintainers");
    }

    #[test]
    fn test_identifier_empty_request() {
        assert_eq!(ReviewRequest::default().identifier(), "");
    }

    #[test]
    fn test_team_request() {
        assert_eq!(ReviewRequest::team("Platform").identifier(), "platform");
    }
}
