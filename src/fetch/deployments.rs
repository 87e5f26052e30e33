use super::EventFetcher;
use crate::error::DoraError;
use crate::github::types::DeploymentMeta;
use crate::models::DeploymentEvent;
use crate::period::DateRange;
use tracing::info;

fn to_event(repo: &str, meta: DeploymentMeta) -> DeploymentEvent {
    DeploymentEvent {
        id: meta.id,
        environment: meta.environment,
        created_at: meta.created_at,
        repo: repo.to_string(),
        git_ref: meta.git_ref,
        description: meta.description,
    }
}

impl EventFetcher {
    /// Deployments across `repos`, concatenated in repository order.
    pub async fn fetch_deployments(
        &self,
        owner: &str,
        repos: &[String],
        range: &DateRange,
    ) -> Vec<DeploymentEvent> {
        let owner = owner.to_string();
        let range = *range;

        let deployments = self
            .for_each_repo(repos, "deployments", move |fetcher, repo| {
                let owner = owner.clone();
                async move { fetcher.repo_deployments(&owner, &repo, &range).await }
            })
            .await;

        info!("Fetched {} deployments across {} repositories", deployments.len(), repos.len());
        deployments
    }

    pub async fn repo_deployments(
        &self,
        owner: &str,
        repo: &str,
        range: &DateRange,
    ) -> Result<Vec<DeploymentEvent>, DoraError> {
        let mut deployments = Vec::new();
        let mut page = 1;

        loop {
            let items = self.source.list_deployments(owner, repo, page).await?;
            let page_len = items.len();
            let mut reached_older = false;

            for meta in items {
                if range.is_before_start(meta.created_at) {
                    reached_older = true;
                    continue;
                }
                if range.contains(meta.created_at) {
                    deployments.push(to_event(repo, meta));
                }
            }

            if reached_older || self.is_last_page(page_len) {
                break;
            }
            page += 1;
        }

        Ok(deployments)
    }
}
