use super::EventFetcher;
use crate::error::DoraError;
use crate::github::types::{CommitMeta, PullRequestMeta};
use crate::models::{CommitEvent, PullRequestEvent};
use crate::period::DateRange;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

const UNKNOWN_AUTHOR: &str = "unknown";

impl From<CommitMeta> for CommitEvent {
    fn from(meta: CommitMeta) -> Self {
        let message = meta.commit.message.lines().next().unwrap_or_default().to_string();
        let signature = meta.commit.author;

        let author = meta
            .author
            .map(|user| user.login)
            .or_else(|| signature.as_ref().and_then(|s| s.name.clone()))
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        Self {
            sha: meta.sha,
            message,
            author,
            timestamp: signature.and_then(|s| s.date),
        }
    }
}

fn to_event(
    repo: &str,
    pr: PullRequestMeta,
    merged_at: DateTime<Utc>,
    commits: Vec<CommitEvent>,
) -> PullRequestEvent {
    PullRequestEvent {
        repo: repo.to_string(),
        number: pr.number,
        title: pr.title,
        description: pr.body,
        author: pr
            .user
            .map(|u| u.login)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        created_at: pr.created_at,
        merged_at,
        commits,
        additions: pr.additions.unwrap_or(0),
        deletions: pr.deletions.unwrap_or(0),
        changed_files: pr.changed_files.unwrap_or(0),
        url: pr.html_url,
    }
}

impl EventFetcher {
    /// Merged pull requests across `repos`, newest merge first.
    pub async fn fetch_merged_prs(
        &self,
        owner: &str,
        repos: &[String],
        range: &DateRange,
    ) -> Vec<PullRequestEvent> {
        let owner = owner.to_string();
        let range = *range;

        let mut prs = self
            .for_each_repo(repos, "pull requests", move |fetcher, repo| {
                let owner = owner.clone();
                async move { fetcher.repo_merged_prs(&owner, &repo, &range).await }
            })
            .await;

        prs.sort_by(|a, b| b.merged_at.cmp(&a.merged_at));
        info!("Fetched {} merged pull requests across {} repositories", prs.len(), repos.len());
        prs
    }

    /// Merged pull requests for one repository.
    ///
    /// Upstream sorts by last update, so a merge older than the range does
    /// not rule out in-range merges later on the same page. The whole page is
    /// evaluated before pagination stops.
    pub async fn repo_merged_prs(
        &self,
        owner: &str,
        repo: &str,
        range: &DateRange,
    ) -> Result<Vec<PullRequestEvent>, DoraError> {
        let mut prs = Vec::new();
        let mut page = 1;

        loop {
            let items = self.source.list_closed_pull_requests(owner, repo, page).await?;
            let page_len = items.len();
            let mut reached_older = false;

            for pr in items {
                let Some(merged_at) = pr.merged_at else {
                    continue;
                };

                if !range.contains(merged_at) {
                    if range.is_before_start(merged_at) {
                        reached_older = true;
                    }
                    continue;
                }

                let commits = self.pr_commits(owner, repo, pr.number).await;
                prs.push(to_event(repo, pr, merged_at, commits));
            }

            if reached_older || self.is_last_page(page_len) {
                break;
            }
            page += 1;
        }

        Ok(prs)
    }

    async fn pr_commits(&self, owner: &str, repo: &str, number: u64) -> Vec<CommitEvent> {
        match self.source.list_pull_request_commits(owner, repo, number).await {
            Ok(commits) => commits.into_iter().map(CommitEvent::from).collect(),
            Err(e) => {
                warn!("Failed to get commits for {}/{} PR #{}: {}", owner, repo, number, e);
                Vec::new()
            }
        }
    }
}
