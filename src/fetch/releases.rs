use super::EventFetcher;
use crate::error::DoraError;
use crate::github::types::ReleaseMeta;
use crate::models::{DeploymentEvent, RELEASE_ENVIRONMENT};
use crate::period::DateRange;
use tracing::info;

/// A published release reinterpreted as a production deployment of its tag.
fn to_event(repo: &str, meta: ReleaseMeta) -> DeploymentEvent {
    DeploymentEvent {
        id: meta.id,
        environment: RELEASE_ENVIRONMENT.to_string(),
        created_at: meta.effective_at(),
        repo: repo.to_string(),
        git_ref: meta.tag_name,
        description: meta.name,
    }
}

impl EventFetcher {
    pub async fn fetch_releases(
        &self,
        owner: &str,
        repos: &[String],
        range: &DateRange,
    ) -> Vec<DeploymentEvent> {
        let owner = owner.to_string();
        let range = *range;

        let releases = self
            .for_each_repo(repos, "releases", move |fetcher, repo| {
                let owner = owner.clone();
                async move { fetcher.repo_releases(&owner, &repo, &range).await }
            })
            .await;

        info!("Fetched {} releases across {} repositories", releases.len(), repos.len());
        releases
    }

    /// Published releases in range. Drafts are skipped regardless of date.
    pub async fn repo_releases(
        &self,
        owner: &str,
        repo: &str,
        range: &DateRange,
    ) -> Result<Vec<DeploymentEvent>, DoraError> {
        let mut releases = Vec::new();
        let mut page = 1;

        loop {
            let items = self.source.list_releases(owner, repo, page).await?;
            let page_len = items.len();
            let mut reached_older = false;

            for meta in items {
                if meta.draft {
                    continue;
                }

                let released_at = meta.effective_at();
                if range.is_before_start(released_at) {
                    reached_older = true;
                    continue;
                }
                if range.contains(released_at) {
                    releases.push(to_event(repo, meta));
                }
            }

            if reached_older || self.is_last_page(page_len) {
                break;
            }
            page += 1;
        }

        Ok(releases)
    }
}
