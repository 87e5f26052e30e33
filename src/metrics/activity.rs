use crate::models::PullRequestEvent;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Volume summary of a set of merged pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestStats {
    pub total_prs: u64,
    pub total_developers: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
}

pub fn summarize_pull_requests(prs: &[PullRequestEvent]) -> PullRequestStats {
    let developers: BTreeSet<&str> = prs.iter().map(|pr| pr.author.as_str()).collect();

    PullRequestStats {
        total_prs: prs.len() as u64,
        total_developers: developers.len() as u64,
        total_additions: prs.iter().map(|pr| pr.additions).sum(),
        total_deletions: prs.iter().map(|pr| pr.deletions).sum(),
    }
}

/// Merged pull requests of one developer within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperMonthStats {
    pub developer: String,
    /// UTC merge month, `YYYY-MM`.
    pub month: String,
    pub pr_count: u64,
    pub additions: u64,
    pub deletions: u64,
}

/// Group merged PRs by author and merge month, ordered by month then
/// developer. With `developer` set, only that author's PRs are counted.
pub fn developer_monthly_stats(prs: &[PullRequestEvent], developer: Option<&str>) -> Vec<DeveloperMonthStats> {
    let mut groups: BTreeMap<(String, &str), DeveloperMonthStats> = BTreeMap::new();

    for pr in prs {
        if developer.is_some_and(|d| d != pr.author) {
            continue;
        }
        let month = pr.merged_at.format("%Y-%m").to_string();
        let entry = groups
            .entry((month.clone(), pr.author.as_str()))
            .or_insert_with(|| DeveloperMonthStats {
                developer: pr.author.clone(),
                month,
                pr_count: 0,
                additions: 0,
                deletions: 0,
            });
        entry.pr_count += 1;
        entry.additions += pr.additions;
        entry.deletions += pr.deletions;
    }

    groups.into_values().collect()
}
