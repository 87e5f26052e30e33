use super::types::{DeploymentFrequencyResult, PerformanceLevel, WeeklyCount};
use super::weeks::week_bucket;
use crate::models::{DeploymentEvent, PullRequestEvent};
use crate::period::DateRange;
use crate::selector::DeploymentSource;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Minimal view of anything counted as a deployment.
struct FrequencyEvent<'a> {
    repo: &'a str,
    at: DateTime<Utc>,
}

/// DORA thresholds: daily or better, weekly, monthly.
pub fn classify_deployment_frequency(deployments_per_day: f64) -> PerformanceLevel {
    if deployments_per_day >= 1.0 {
        PerformanceLevel::Elite
    } else if deployments_per_day >= 1.0 / 7.0 {
        PerformanceLevel::High
    } else if deployments_per_day >= 1.0 / 30.0 {
        PerformanceLevel::Medium
    } else {
        PerformanceLevel::Low
    }
}

/// Per-week counts with every 7-day stride from `from` to `to` present.
///
/// The stride starts at `from`, not at a week boundary, so the last bucket
/// may only partially overlap the range.
pub fn weekly_trend<I>(timestamps: I, range: &DateRange) -> Vec<WeeklyCount>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut weeks: BTreeMap<_, u64> = BTreeMap::new();
    for ts in timestamps {
        *weeks.entry(week_bucket(ts)).or_insert(0) += 1;
    }

    let end = range.to_start();
    let mut cursor = range.start();
    while cursor <= end {
        weeks.entry(week_bucket(cursor)).or_insert(0);
        cursor += Duration::days(7);
    }

    weeks
        .into_iter()
        .map(|(week, count)| WeeklyCount { week, count })
        .collect()
}

/// Deployment frequency over `range`. With the `pull_requests` source, PR
/// merges are counted and `deployments` is ignored.
pub fn calculate_deployment_frequency(
    deployments: &[DeploymentEvent],
    prs: &[PullRequestEvent],
    range: &DateRange,
    source: DeploymentSource,
) -> DeploymentFrequencyResult {
    let events: Vec<FrequencyEvent<'_>> = match source {
        DeploymentSource::PullRequests => prs
            .iter()
            .map(|pr| FrequencyEvent {
                repo: &pr.repo,
                at: pr.merged_at,
            })
            .collect(),
        DeploymentSource::Deployments | DeploymentSource::Releases => deployments
            .iter()
            .map(|d| FrequencyEvent {
                repo: &d.repo,
                at: d.created_at,
            })
            .collect(),
    };

    let period_days = range.period_days();
    let total_deployments = events.len() as u64;
    let deployments_per_day = total_deployments as f64 / period_days;

    let mut deployments_by_repo = BTreeMap::new();
    for event in &events {
        *deployments_by_repo.entry(event.repo.to_string()).or_insert(0) += 1;
    }

    DeploymentFrequencyResult {
        total_deployments,
        deployments_per_day,
        deployments_per_week: deployments_per_day * 7.0,
        period_days,
        deployments_by_repo,
        weekly_trend: weekly_trend(events.iter().map(|e| e.at), range),
        performance_level: classify_deployment_frequency(deployments_per_day),
        source,
    }
}
