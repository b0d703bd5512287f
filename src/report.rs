use chrono::{DateTime, Locale, Utc};
use serde::Serialize;

use crate::categories::{aggregate_companies, aggregate_status, CompanyRankEntry, StatusDistributionEntry};
use crate::models::{JobRecord, SearchRecord};
use crate::performance::{score_searches, SearchPerformanceEntry};
use crate::summary::{count_jobs_on, summarize, SummaryMetrics};
use crate::timeseries::aggregate_time_series;
use crate::window::{plan_window, DayBucket, WindowRange};

/// Everything the statistics page renders, computed in one pass over the records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub range: WindowRange,
    pub generated_at: DateTime<Utc>,
    pub stats: SummaryMetrics,
    pub today_jobs: u32,
    pub jobs_over_time: Vec<DayBucket>,
    pub jobs_by_status: Vec<StatusDistributionEntry>,
    pub jobs_by_company: Vec<CompanyRankEntry>,
    pub search_performance: Vec<SearchPerformanceEntry>,
}

pub fn build_report(
    jobs: &[JobRecord],
    searches: &[SearchRecord],
    range: WindowRange,
    now: DateTime<Utc>,
    locale: Locale,
) -> StatsReport {
    let buckets = plan_window(range, now, locale);

    StatsReport {
        range,
        generated_at: now,
        stats: summarize(jobs, searches, range.days()),
        today_jobs: count_jobs_on(jobs, now.date_naive()),
        jobs_over_time: aggregate_time_series(buckets, jobs),
        jobs_by_status: aggregate_status(jobs),
        jobs_by_company: aggregate_companies(jobs),
        search_performance: score_searches(searches, jobs),
    }
}
