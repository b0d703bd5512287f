use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{JobRecord, JobStatus, SearchRecord};
use crate::normalize::resolve_job_date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_jobs: u32,
    pub active_searches: u32,
    /// Share of jobs with status `applied`, as a rounded percentage.
    pub success_rate: u32,
    pub average_jobs_per_day: u32,
}

pub fn summarize(jobs: &[JobRecord], searches: &[SearchRecord], window_days: u32) -> SummaryMetrics {
    let total = jobs.len() as u64;
    let applied = jobs.iter().filter(|j| j.status == JobStatus::Applied).count() as u64;

    SummaryMetrics {
        total_jobs: clamp_count(jobs.len()),
        active_searches: clamp_count(searches.iter().filter(|s| s.is_active).count()),
        success_rate: if total > 0 {
            round_ratio(applied * 100, total)
        } else {
            0
        },
        average_jobs_per_day: round_ratio(total, u64::from(window_days.max(1))),
    }
}

/// Jobs whose normalized date is `day`. Drives the "found today" tile.
pub fn count_jobs_on(jobs: &[JobRecord], day: NaiveDate) -> u32 {
    let count = jobs
        .iter()
        .filter(|job| resolve_job_date(job) == Some(day))
        .count();
    clamp_count(count)
}

/// Saturates a collection count into the `u32` the reports carry.
pub fn clamp_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

// n / d rounded half up, in integers. `d` must be non-zero.
fn round_ratio(n: u64, d: u64) -> u32 {
    let rounded = (u128::from(n) * 2 + u128::from(d)) / (u128::from(d) * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
