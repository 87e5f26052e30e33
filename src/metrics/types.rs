use crate::selector::DeploymentSource;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// DORA performance bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceLevel {
    Elite,
    High,
    Medium,
    Low,
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PerformanceLevel::Elite => "elite",
            PerformanceLevel::High => "high",
            PerformanceLevel::Medium => "medium",
            PerformanceLevel::Low => "low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCount {
    /// Sunday starting the week.
    pub week: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentFrequencyResult {
    pub total_deployments: u64,
    pub deployments_per_day: f64,
    pub deployments_per_week: f64,
    pub period_days: f64,
    pub deployments_by_repo: BTreeMap<String, u64>,
    pub weekly_trend: Vec<WeeklyCount>,
    pub performance_level: PerformanceLevel,
    pub source: DeploymentSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeItem {
    pub repo: String,
    pub pr_number: u64,
    pub title: String,
    pub author: String,
    pub first_commit_to_merge_hours: f64,
    pub open_to_merge_hours: f64,
    pub merged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeResult {
    pub average_hours: f64,
    pub median_hours: f64,
    pub p90_hours: f64,
    /// Slowest first.
    pub items: Vec<LeadTimeItem>,
    pub performance_level: PerformanceLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoraMetrics {
    pub deployment_frequency: DeploymentFrequencyResult,
    pub lead_time: LeadTimeResult,
}
