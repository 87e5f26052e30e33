use crate::error::DoraError;
use crate::github::types::{CommitMeta, DeploymentMeta, PullRequestMeta, ReleaseMeta, RepoMeta};
use async_trait::async_trait;

/// Read-only view of the remote event source.
///
/// Listing calls are paged: `page` starts at 1 and an empty page means the
/// listing is exhausted. Implementations return upstream ordering untouched;
/// the fetch layer relies on it for early termination.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn list_org_repositories(&self, org: &str, page: u32) -> Result<Vec<RepoMeta>, DoraError>;

    async fn list_user_repositories(&self, user: &str, page: u32) -> Result<Vec<RepoMeta>, DoraError>;

    /// Closed pull requests, most recently updated first.
    async fn list_closed_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<Vec<PullRequestMeta>, DoraError>;

    /// First page of a pull request's commits, capped by the implementation.
    async fn list_pull_request_commits(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitMeta>, DoraError>;

    /// Deployments, newest first.
    async fn list_deployments(&self, owner: &str, repo: &str, page: u32) -> Result<Vec<DeploymentMeta>, DoraError>;

    /// Releases, newest first.
    async fn list_releases(&self, owner: &str, repo: &str, page: u32) -> Result<Vec<ReleaseMeta>, DoraError>;
}
