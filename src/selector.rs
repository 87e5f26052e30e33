//! Choice of the event stream that stands in for deployments.
//!
//! Providers are queried in order and the first non-empty result wins.
//! Sources are never merged. When no provider yields anything the selection
//! is tagged `pull_requests` and the metrics engine substitutes PR merges.

use crate::fetch::EventFetcher;
use crate::models::DeploymentEvent;
use crate::period::DateRange;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentSource {
    Deployments,
    Releases,
    PullRequests,
}

impl DeploymentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentSource::Deployments => "deployments",
            DeploymentSource::Releases => "releases",
            DeploymentSource::PullRequests => "pull_requests",
        }
    }
}

impl fmt::Display for DeploymentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSelection {
    pub events: Vec<DeploymentEvent>,
    pub source: DeploymentSource,
}

/// One candidate source of deployment-like events.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    fn source(&self) -> DeploymentSource;

    async fn fetch(&self, owner: &str, repos: &[String], range: &DateRange) -> Vec<DeploymentEvent>;
}

pub struct DeploymentsProvider {
    fetcher: EventFetcher,
}

impl DeploymentsProvider {
    pub fn new(fetcher: EventFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl SourceProvider for DeploymentsProvider {
    fn source(&self) -> DeploymentSource {
        DeploymentSource::Deployments
    }

    async fn fetch(&self, owner: &str, repos: &[String], range: &DateRange) -> Vec<DeploymentEvent> {
        self.fetcher.fetch_deployments(owner, repos, range).await
    }
}

pub struct ReleasesProvider {
    fetcher: EventFetcher,
}

impl ReleasesProvider {
    pub fn new(fetcher: EventFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl SourceProvider for ReleasesProvider {
    fn source(&self) -> DeploymentSource {
        DeploymentSource::Releases
    }

    async fn fetch(&self, owner: &str, repos: &[String], range: &DateRange) -> Vec<DeploymentEvent> {
        self.fetcher.fetch_releases(owner, repos, range).await
    }
}

pub struct SourceSelector {
    providers: Vec<Box<dyn SourceProvider>>,
}

impl SourceSelector {
    pub fn new(providers: Vec<Box<dyn SourceProvider>>) -> Self {
        Self { providers }
    }

    /// Deployments, then releases.
    pub fn standard(fetcher: EventFetcher) -> Self {
        Self::new(vec![
            Box::new(DeploymentsProvider::new(fetcher.clone())),
            Box::new(ReleasesProvider::new(fetcher)),
        ])
    }

    pub async fn select(&self, owner: &str, repos: &[String], range: &DateRange) -> SourceSelection {
        for provider in &self.providers {
            let mut events = provider.fetch(owner, repos, range).await;
            if events.is_empty() {
                info!("No {} found, trying next source", provider.source());
                continue;
            }

            events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            info!("Using {} {} as deployment source", events.len(), provider.source());
            return SourceSelection {
                events,
                source: provider.source(),
            };
        }

        info!("No deployments or releases found, using merged pull requests as proxy");
        SourceSelection {
            events: Vec::new(),
            source: DeploymentSource::PullRequests,
        }
    }
}
