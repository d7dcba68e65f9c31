//! Pull request references

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A pull request to watch
///
/// Recognised formats are normalised:
/// - 123 or #123 (repository taken from the current directory by gh)
/// - owner/repo#123
/// - https://github.com/owner/repo/pull/123
///
/// Anything else (a branch name, for instance) is handed to gh unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrTarget {
    /// A PR number, optionally qualified by a repository in gh's
    /// `[HOST/]OWNER/REPO` form
    Number { repo: Option<String>, number: u64 },
    /// A reference gh resolves itself
    Raw(String),
}

impl PrTarget {
    /// Parse a pull request reference
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidTarget(input.to_string()));
        }

        Ok(parse_known(input).unwrap_or_else(|| PrTarget::Raw(input.to_string())))
    }

    /// PR number, if the reference carries one
    pub fn number(&self) -> Option<u64> {
        match self {
            PrTarget::Number { number, .. } => Some(*number),
            PrTarget::Raw(_) => None,
        }
    }

    /// Repository qualifier, if the reference carries one
    pub fn repo(&self) -> Option<&str> {
        match self {
            PrTarget::Number { repo, .. } => repo.as_deref(),
            PrTarget::Raw(_) => None,
        }
    }

    /// Arguments identifying this pull request on a `gh pr` command line
    pub fn gh_args(&self) -> Vec<String> {
        match self {
            PrTarget::Number { repo, number } => {
                let mut args = vec![number.to_string()];
                if let Some(repo) = repo {
                    args.push("--repo".to_string());
                    args.push(repo.clone());
                }
                args
            }
            PrTarget::Raw(raw) => vec![raw.clone()],
        }
    }
}

impl FromStr for PrTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PrTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrTarget::Number {
                repo: Some(repo),
                number,
            } => write!(f, "{}#{}", repo, number),
            PrTarget::Number { repo: None, number } => write!(f, "#{}", number),
            PrTarget::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Normalise the reference forms we understand
fn parse_known(input: &str) -> Option<PrTarget> {
    if input.starts_with("https://") || input.starts_with("http://") {
        return parse_pr_url(input);
    }

    if let Some((repo, number)) = input.split_once('#') {
        let number = parse_number(number)?;
        if repo.is_empty() {
            return Some(PrTarget::Number { repo: None, number });
        }

        let parts: Vec<&str> = repo.split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        return Some(PrTarget::Number {
            repo: Some(repo.to_string()),
            number,
        });
    }

    parse_number(input).map(|number| PrTarget::Number { repo: None, number })
}

fn parse_number(s: &str) -> Option<u64> {
    s.parse().ok().filter(|n| *n > 0)
}

/// Parse https://HOST/OWNER/REPO/pull/NUMBER[/...]
fn parse_pr_url(input: &str) -> Option<PrTarget> {
    let url = url::Url::parse(input).ok()?;

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [owner, repo, "pull" | "pulls", number, ..] => {
            let number = parse_number(number)?;
            let host = url.host_str()?;
            let repo = if host == "github.com" || host == "www.github.com" {
                format!("{}/{}", owner, repo)
            } else {
                format!("{}/{}/{}", host, owner, repo)
            };
            Some(PrTarget::Number {
                repo: Some(repo),
                number,
            })
        }
        _ => None,
    }
}
