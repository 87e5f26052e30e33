use super::stats::{mean, median, percentile};
use super::types::{LeadTimeItem, LeadTimeResult, PerformanceLevel};
use crate::models::PullRequestEvent;
use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;

/// Hours from `from` to `to`, never negative.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    ((to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR).max(0.0)
}

/// DORA thresholds on median lead time: an hour, a day, a week.
pub fn classify_lead_time(median_hours: f64) -> PerformanceLevel {
    if median_hours < 1.0 {
        PerformanceLevel::Elite
    } else if median_hours < 24.0 {
        PerformanceLevel::High
    } else if median_hours < 168.0 {
        PerformanceLevel::Medium
    } else {
        PerformanceLevel::Low
    }
}

fn lead_time_item(pr: &PullRequestEvent) -> LeadTimeItem {
    let open_to_merge_hours = hours_between(pr.created_at, pr.merged_at);
    let first_commit_to_merge_hours = match pr.first_commit_at() {
        Some(first_commit) => hours_between(first_commit, pr.merged_at),
        None => open_to_merge_hours,
    };

    LeadTimeItem {
        repo: pr.repo.clone(),
        pr_number: pr.number,
        title: pr.title.clone(),
        author: pr.author.clone(),
        first_commit_to_merge_hours,
        open_to_merge_hours,
        merged_at: pr.merged_at,
    }
}

pub fn calculate_lead_time(prs: &[PullRequestEvent]) -> LeadTimeResult {
    let mut items: Vec<LeadTimeItem> = prs.iter().map(lead_time_item).collect();
    let hours: Vec<f64> = items.iter().map(|i| i.first_commit_to_merge_hours).collect();

    let median_hours = median(&hours);

    // Downstream "slowest N" views read from the front.
    items.sort_by(|a, b| b.first_commit_to_merge_hours.total_cmp(&a.first_commit_to_merge_hours));

    LeadTimeResult {
        average_hours: mean(&hours),
        median_hours,
        p90_hours: percentile(&hours, 90.0),
        items,
        performance_level: classify_lead_time(median_hours),
    }
}
