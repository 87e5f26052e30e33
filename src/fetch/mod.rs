//! Paginated, date-bounded event fetching with per-repository failure
//! isolation.
//!
//! Each repository is fetched in its own task; at most
//! `max_concurrent_repos` tasks talk to GitHub at once. A repository whose
//! fetch fails is logged and contributes no events, so one bad repository
//! never sinks the whole request.

pub mod deployments;
pub mod pull_requests;
pub mod releases;
pub mod repositories;

use crate::config::AppConfig;
use crate::error::DoraError;
use crate::github::EventSource;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Page size requested from upstream; a shorter page ends pagination.
    pub page_size: usize,
    pub max_concurrent_repos: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_concurrent_repos: 4,
        }
    }
}

impl From<&AppConfig> for FetchOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size as usize,
            max_concurrent_repos: config.max_concurrent_repos.max(1),
        }
    }
}

#[derive(Clone)]
pub struct EventFetcher {
    source: Arc<dyn EventSource>,
    options: FetchOptions,
}

impl EventFetcher {
    pub fn new(source: Arc<dyn EventSource>, options: FetchOptions) -> Self {
        Self { source, options }
    }

    fn is_last_page(&self, len: usize) -> bool {
        len == 0 || len < self.options.page_size
    }

    /// Run `fetch` for every repository and concatenate the successes in
    /// repository order.
    async fn for_each_repo<T, F, Fut>(&self, repos: &[String], kind: &'static str, fetch: F) -> Vec<T>
    where
        T: Send + 'static,
        F: Fn(EventFetcher, String) -> Fut,
        Fut: Future<Output = Result<Vec<T>, DoraError>> + Send + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrent_repos.max(1)));
        let total = repos.len();
        let mut handles = Vec::with_capacity(total);

        for (idx, repo) in repos.iter().enumerate() {
            let semaphore = semaphore.clone();
            let task = fetch(self.clone(), repo.clone());
            let label = repo.clone();

            handles.push((
                repo.clone(),
                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire()
                        .await
                        .map_err(|e| DoraError::GitHubError(format!("Fetch pool closed: {}", e)))?;
                    debug!("Fetching {} for {} ({}/{})", kind, label, idx + 1, total);
                    task.await
                }),
            ));
        }

        let mut merged = Vec::new();
        for (repo, handle) in handles {
            match handle.await {
                Ok(Ok(events)) => {
                    debug!("Fetched {} {} for {}", events.len(), kind, repo);
                    merged.extend(events);
                }
                Ok(Err(e)) => {
                    warn!("Failed to get {} for {}: {}", kind, repo, e);
                }
                Err(e) => {
                    warn!("Fetch task for {} {} did not complete: {}", repo, kind, e);
                }
            }
        }

        merged
    }
}
