//! Pure reduction of fetched events into DORA metrics. No I/O.

pub mod activity;
pub mod frequency;
pub mod lead_time;
pub mod stats;
pub mod types;
pub mod weeks;

pub use activity::{developer_monthly_stats, summarize_pull_requests, DeveloperMonthStats, PullRequestStats};
pub use frequency::{calculate_deployment_frequency, classify_deployment_frequency};
pub use lead_time::{calculate_lead_time, classify_lead_time};
pub use types::{
    DeploymentFrequencyResult, DoraMetrics, LeadTimeItem, LeadTimeResult, PerformanceLevel, WeeklyCount,
};

use crate::models::{DeploymentEvent, PullRequestEvent};
use crate::period::DateRange;
use crate::selector::DeploymentSource;

/// Deployment frequency from the selected source plus lead time from `prs`.
pub fn compute_dora_metrics(
    deployments: &[DeploymentEvent],
    prs: &[PullRequestEvent],
    range: &DateRange,
    source: DeploymentSource,
) -> DoraMetrics {
    DoraMetrics {
        deployment_frequency: calculate_deployment_frequency(deployments, prs, range, source),
        lead_time: calculate_lead_time(prs),
    }
}
