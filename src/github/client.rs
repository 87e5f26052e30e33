use crate::config::AppConfig;
use crate::error::DoraError;
use crate::github::source::EventSource;
use crate::github::types::{CommitMeta, DeploymentMeta, PullRequestMeta, ReleaseMeta, RepoMeta};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ListParams<'a> {
    per_page: u8,
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<&'a str>,
}

impl<'a> ListParams<'a> {
    fn page(per_page: u8, page: u32) -> Self {
        Self {
            per_page,
            page,
            state: None,
            sort: None,
            direction: None,
        }
    }

    fn updated_desc(mut self) -> Self {
        self.sort = Some("updated");
        self.direction = Some("desc");
        self
    }
}

/// `EventSource` backed by the GitHub REST API.
pub struct GitHubClient {
    client: Octocrab,
    page_size: u8,
    commit_limit: u8,
}

impl GitHubClient {
    pub fn new(config: &AppConfig) -> Result<Self, DoraError> {
        let token = config.require_token()?;

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(config.github_api_url.as_str())
            .map_err(|e| DoraError::ConfigError(format!("Invalid GitHub API URL: {}", e)))?
            .build()
            .map_err(|e| DoraError::GitHubError(format!("Failed to create GitHub client: {}", e)))?;

        Ok(Self {
            client,
            page_size: config.page_size,
            commit_limit: config.commit_limit,
        })
    }

    async fn get_list<T>(&self, route: String, params: &ListParams<'_>) -> Result<Vec<T>, DoraError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("GET {} page={}", route, params.page);
        let items: Vec<T> = self.client.get(route, Some(params)).await?;
        Ok(items)
    }
}

#[async_trait]
impl EventSource for GitHubClient {
    async fn list_org_repositories(&self, org: &str, page: u32) -> Result<Vec<RepoMeta>, DoraError> {
        let params = ListParams::page(self.page_size, page).updated_desc();
        self.get_list(format!("/orgs/{}/repos", org), &params).await
    }

    async fn list_user_repositories(&self, user: &str, page: u32) -> Result<Vec<RepoMeta>, DoraError> {
        let params = ListParams::page(self.page_size, page).updated_desc();
        self.get_list(format!("/users/{}/repos", user), &params).await
    }

    async fn list_closed_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<Vec<PullRequestMeta>, DoraError> {
        let mut params = ListParams::page(self.page_size, page).updated_desc();
        params.state = Some("closed");
        self.get_list(format!("/repos/{}/{}/pulls", owner, repo), &params)
            .await
    }

    async fn list_pull_request_commits(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitMeta>, DoraError> {
        let params = ListParams::page(self.commit_limit, 1);
        self.get_list(
            format!("/repos/{}/{}/pulls/{}/commits", owner, repo, number),
            &params,
        )
        .await
    }

    async fn list_deployments(&self, owner: &str, repo: &str, page: u32) -> Result<Vec<DeploymentMeta>, DoraError> {
        let params = ListParams::page(self.page_size, page);
        self.get_list(format!("/repos/{}/{}/deployments", owner, repo), &params)
            .await
    }

    async fn list_releases(&self, owner: &str, repo: &str, page: u32) -> Result<Vec<ReleaseMeta>, DoraError> {
        let params = ListParams::page(self.page_size, page);
        self.get_list(format!("/repos/{}/{}/releases", owner, repo), &params)
            .await
    }
}
