//! Event value objects produced by the fetch layer and consumed by the
//! metrics engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organization (or user) plus repository name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository listing entry for an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub private: bool,
    pub default_branch: String,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitEvent {
    pub sha: String,
    /// First line of the commit message.
    pub message: String,
    pub author: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A merged pull request. Unmerged PRs are never modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    pub repo: String,
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub merged_at: DateTime<Utc>,
    /// Best-effort; empty when the commit listing failed.
    pub commits: Vec<CommitEvent>,
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
    pub url: String,
}

impl PullRequestEvent {
    /// Earliest authored commit timestamp, if any commit carries one.
    pub fn first_commit_at(&self) -> Option<DateTime<Utc>> {
        self.commits.iter().filter_map(|c| c.timestamp).min()
    }
}

/// A deployment, or a published release standing in for one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentEvent {
    pub id: u64,
    pub environment: String,
    pub created_at: DateTime<Utc>,
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub description: Option<String>,
}

/// Environment label given to releases reinterpreted as deployments.
pub const RELEASE_ENVIRONMENT: &str = "production";
