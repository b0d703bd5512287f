use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::JobRecord;
use crate::normalize::resolve_job_date;
use crate::window::DayBucket;

/// Fills per-day counts and the running total for a planned window.
///
/// Jobs without a resolvable date, or dated outside the window, are not counted.
pub fn aggregate_time_series(mut buckets: Vec<DayBucket>, jobs: &[JobRecord]) -> Vec<DayBucket> {
    let mut per_day: HashMap<NaiveDate, u32> = HashMap::new();
    for day in jobs.iter().filter_map(resolve_job_date) {
        let count = per_day.entry(day).or_insert(0);
        *count = count.saturating_add(1);
    }

    let mut running: u32 = 0;
    for bucket in &mut buckets {
        bucket.count = per_day.get(&bucket.day).copied().unwrap_or(0);
        running = running.saturating_add(bucket.count);
        bucket.cumulative = running;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{plan_window, WindowRange};
    use chrono::{Locale, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn found_on(date: &str) -> JobRecord {
        JobRecord {
            date_found: Some(date.to_string()),
            ..Default::default()
        }
    }

    fn week_ending_jan_7() -> Vec<DayBucket> {
        let now = Utc.with_ymd_and_hms(2024, 1, 7, 12, 0, 0).unwrap();
        plan_window(WindowRange::Last7Days, now, Locale::en_US)
    }

    #[test]
    fn test_counts_and_cumulative() {
        let jobs = vec![
            found_on("2024-01-01T09:00:00"),
            found_on("2024-01-01T18:00:00"),
            found_on("2024-01-03"),
            found_on("2024-01-07T00:00:01Z"),
        ];
        let series = aggregate_time_series(week_ending_jan_7(), &jobs);

        let counts: Vec<u32> = series.iter().map(|b| b.count).collect();
        let cumulative: Vec<u32> = series.iter().map(|b| b.cumulative).collect();
        assert_eq!(counts, vec![2, 0, 1, 0, 0, 0, 1]);
        assert_eq!(cumulative, vec![2, 2, 3, 3, 3, 3, 4]);
    }

    #[test]
    fn test_excludes_undated_and_out_of_window_jobs() {
        let jobs = vec![
            found_on("2023-12-31"),
            found_on("2024-01-08"),
            found_on("not-a-date"),
            JobRecord::default(),
            found_on("2024-01-05"),
        ];
        let series = aggregate_time_series(week_ending_jan_7(), &jobs);

        let total: u32 = series.iter().map(|b| b.count).sum();
        assert_eq!(total, 1);
        assert_eq!(series.last().unwrap().cumulative, total);
    }

    #[test]
    fn test_empty_jobs_keep_full_window() {
        let series = aggregate_time_series(week_ending_jan_7(), &[]);
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|b| b.count == 0 && b.cumulative == 0));
    }

    #[test]
    fn test_cumulative_is_monotonic_over_long_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 8, 0, 0).unwrap();
        let buckets = plan_window(WindowRange::Last90Days, now, Locale::en_US);
        let jobs: Vec<JobRecord> = (1..=28)
            .map(|d| found_on(&format!("2024-02-{:02}", d)))
            .chain([found_on("2024-03-31"), found_on("2024-03-31")])
            .collect();

        let series = aggregate_time_series(buckets, &jobs);
        assert_eq!(series.len(), 90);
        for pair in series.windows(2) {
            assert!(pair[1].cumulative >= pair[0].cumulative);
        }
        let total: u32 = series.iter().map(|b| b.count).sum();
        assert_eq!(total, 30);
        assert_eq!(series.last().unwrap().count, 2);
        assert_eq!(series.last().unwrap().cumulative, 30);
    }
}
