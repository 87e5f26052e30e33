#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dora_metrics::error::DoraError;
use dora_metrics::github::types::{
    CommitMeta, DeploymentMeta, GitCommit, GitSignature, PullRequestMeta, ReleaseMeta, RepoMeta, User,
};
use dora_metrics::github::EventSource;
use std::collections::{HashMap, HashSet};

/// In-memory event source. Each repository holds a single page of each kind.
#[derive(Default)]
pub struct FakeGitHub {
    pub pulls: HashMap<String, Vec<PullRequestMeta>>,
    pub commits: HashMap<(String, u64), Vec<CommitMeta>>,
    pub deployments: HashMap<String, Vec<DeploymentMeta>>,
    pub releases: HashMap<String, Vec<ReleaseMeta>>,
    pub unreachable: HashSet<String>,
}

impl FakeGitHub {
    pub fn with_pull(mut self, repo: &str, pr: PullRequestMeta) -> Self {
        self.pulls.entry(repo.to_string()).or_default().push(pr);
        self
    }

    pub fn with_commits(mut self, repo: &str, number: u64, commits: Vec<CommitMeta>) -> Self {
        self.commits.insert((repo.to_string(), number), commits);
        self
    }

    pub fn with_deployment(mut self, repo: &str, deployment: DeploymentMeta) -> Self {
        self.deployments.entry(repo.to_string()).or_default().push(deployment);
        self
    }

    pub fn with_release(mut self, repo: &str, release: ReleaseMeta) -> Self {
        self.releases.entry(repo.to_string()).or_default().push(release);
        self
    }

    pub fn unreachable(mut self, repo: &str) -> Self {
        self.unreachable.insert(repo.to_string());
        self
    }

    fn check(&self, repo: &str) -> Result<(), DoraError> {
        if self.unreachable.contains(repo) {
            return Err(DoraError::GitHubError(format!("network error reaching {}", repo)));
        }
        Ok(())
    }

    fn first_page<T: Clone>(items: Option<&Vec<T>>, page: u32) -> Vec<T> {
        if page > 1 {
            return Vec::new();
        }
        items.cloned().unwrap_or_default()
    }
}

#[async_trait]
impl EventSource for FakeGitHub {
    async fn list_org_repositories(&self, org: &str, _page: u32) -> Result<Vec<RepoMeta>, DoraError> {
        Err(DoraError::NotFound(format!("organization {}", org)))
    }

    async fn list_user_repositories(&self, user: &str, _page: u32) -> Result<Vec<RepoMeta>, DoraError> {
        Err(DoraError::NotFound(format!("user {}", user)))
    }

    async fn list_closed_pull_requests(
        &self,
        _owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<Vec<PullRequestMeta>, DoraError> {
        self.check(repo)?;
        Ok(Self::first_page(self.pulls.get(repo), page))
    }

    async fn list_pull_request_commits(
        &self,
        _owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitMeta>, DoraError> {
        Ok(self
            .commits
            .get(&(repo.to_string(), number))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_deployments(&self, _owner: &str, repo: &str, page: u32) -> Result<Vec<DeploymentMeta>, DoraError> {
        self.check(repo)?;
        Ok(Self::first_page(self.deployments.get(repo), page))
    }

    async fn list_releases(&self, _owner: &str, repo: &str, page: u32) -> Result<Vec<ReleaseMeta>, DoraError> {
        self.check(repo)?;
        Ok(Self::first_page(self.releases.get(repo), page))
    }
}

/// Noon UTC on the given day of January 2024.
pub fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}

pub fn merged_pr(number: u64, author: &str, merged_at: DateTime<Utc>, open_hours: i64) -> PullRequestMeta {
    PullRequestMeta {
        number,
        title: format!("Change #{}", number),
        body: Some("Test PR body".to_string()),
        user: Some(User {
            login: author.to_string(),
        }),
        created_at: merged_at - Duration::hours(open_hours),
        merged_at: Some(merged_at),
        additions: Some(20),
        deletions: Some(4),
        changed_files: Some(3),
        html_url: format!("https://github.com/test-org/test-repo/pull/{}", number),
    }
}

pub fn commit_at(sha: &str, author: &str, date: DateTime<Utc>) -> CommitMeta {
    CommitMeta {
        sha: sha.to_string(),
        commit: GitCommit {
            message: format!("Commit {}", sha),
            author: Some(GitSignature {
                name: Some(author.to_string()),
                date: Some(date),
            }),
        },
        author: Some(User {
            login: author.to_string(),
        }),
    }
}

pub fn deployment(id: u64, created_at: DateTime<Utc>) -> DeploymentMeta {
    DeploymentMeta {
        id,
        environment: "production".to_string(),
        created_at,
        git_ref: "main".to_string(),
        description: Some(format!("Deploy {}", id)),
    }
}

pub fn release(id: u64, tag: &str, draft: bool, published_at: DateTime<Utc>) -> ReleaseMeta {
    ReleaseMeta {
        id,
        tag_name: tag.to_string(),
        name: Some(tag.to_string()),
        draft,
        created_at: published_at - Duration::hours(1),
        published_at: if draft { None } else { Some(published_at) },
    }
}
