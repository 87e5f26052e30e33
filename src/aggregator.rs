use crate::config::AppConfig;
use crate::error::DoraError;
use crate::fetch::{EventFetcher, FetchOptions};
use crate::github::{EventSource, GitHubClient};
use crate::metrics::{compute_dora_metrics, DoraMetrics};
use crate::models::PullRequestEvent;
use crate::period::DateRange;
use crate::selector::{SourceSelection, SourceSelector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// A metrics request as received at the boundary: dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsRequest {
    pub org: String,
    pub repos: Vec<String>,
    pub from_date: String,
    pub to_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub org: String,
    pub repos: Vec<String>,
    pub range: DateRange,
}

impl MetricsRequest {
    pub fn validate(&self) -> Result<ValidatedRequest, DoraError> {
        let org = self.org.trim();
        if org.is_empty() {
            return Err(DoraError::missing_field("org"));
        }

        let repos: Vec<String> = self
            .repos
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if repos.is_empty() {
            return Err(DoraError::ValidationError(
                "repos must be a non-empty list".to_string(),
            ));
        }

        if self.from_date.trim().is_empty() {
            return Err(DoraError::missing_field("from_date"));
        }
        if self.to_date.trim().is_empty() {
            return Err(DoraError::missing_field("to_date"));
        }
        let range = DateRange::parse(&self.from_date, &self.to_date)?;

        Ok(ValidatedRequest {
            org: org.to_string(),
            repos,
            range,
        })
    }
}

/// Drives fetching and source selection, then the metrics engine.
pub struct DoraAggregator {
    fetcher: EventFetcher,
    selector: SourceSelector,
}

impl DoraAggregator {
    pub fn new(fetcher: EventFetcher, selector: SourceSelector) -> Self {
        Self { fetcher, selector }
    }

    /// Standard deployments → releases → pull requests chain over `source`.
    pub fn with_source(source: Arc<dyn EventSource>, options: FetchOptions) -> Self {
        let fetcher = EventFetcher::new(source, options);
        let selector = SourceSelector::standard(fetcher.clone());
        Self::new(fetcher, selector)
    }

    /// GitHub-backed aggregator. Fails if no token is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, DoraError> {
        let client = GitHubClient::new(config)?;
        Ok(Self::with_source(Arc::new(client), FetchOptions::from(config)))
    }

    pub fn fetcher(&self) -> &EventFetcher {
        &self.fetcher
    }

    pub async fn fetch_merged_prs(&self, request: &MetricsRequest) -> Result<Vec<PullRequestEvent>, DoraError> {
        let request = request.validate()?;
        Ok(self
            .fetcher
            .fetch_merged_prs(&request.org, &request.repos, &request.range)
            .await)
    }

    pub async fn fetch_deployment_source(&self, request: &MetricsRequest) -> Result<SourceSelection, DoraError> {
        let request = request.validate()?;
        Ok(self
            .selector
            .select(&request.org, &request.repos, &request.range)
            .await)
    }

    /// Lead time always needs PRs, so they are fetched alongside source
    /// selection regardless of which source wins.
    pub async fn compute(&self, request: &MetricsRequest) -> Result<DoraMetrics, DoraError> {
        let ValidatedRequest { org, repos, range } = request.validate()?;

        info!(
            "Computing DORA metrics for {} ({} repositories, {} to {})",
            org,
            repos.len(),
            range.from,
            range.to
        );

        let (selection, prs) = tokio::join!(
            self.selector.select(&org, &repos, &range),
            self.fetcher.fetch_merged_prs(&org, &repos, &range),
        );

        let metrics = compute_dora_metrics(&selection.events, &prs, &range, selection.source);

        info!(
            "Deployment frequency {} ({:.2}/day from {}), lead time {} (median {:.1}h)",
            metrics.deployment_frequency.performance_level,
            metrics.deployment_frequency.deployments_per_day,
            selection.source,
            metrics.lead_time.performance_level,
            metrics.lead_time.median_hours
        );

        Ok(metrics)
    }
}
