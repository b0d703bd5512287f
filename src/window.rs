use anyhow::{anyhow, Result};
use chrono::{DateTime, Days, Locale, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::labels::day_label;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WindowRange {
    #[default]
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
}

impl WindowRange {
    pub const ALL: [WindowRange; 3] = [
        WindowRange::Last7Days,
        WindowRange::Last30Days,
        WindowRange::Last90Days,
    ];

    /// Lenient lookup used by the dashboard: anything unrecognized is the 7-day window.
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or_default()
    }

    pub fn days(&self) -> u32 {
        match self {
            WindowRange::Last7Days => 7,
            WindowRange::Last30Days => 30,
            WindowRange::Last90Days => 90,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            WindowRange::Last7Days => "7d",
            WindowRange::Last30Days => "30d",
            WindowRange::Last90Days => "90d",
        }
    }
}

impl FromStr for WindowRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        WindowRange::ALL
            .into_iter()
            .find(|range| range.token() == token)
            .ok_or_else(|| anyhow!("Unknown range '{}'. Available: 7d, 30d, 90d", token))
    }
}

impl fmt::Display for WindowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub day: NaiveDate,
    #[serde(rename = "date")]
    pub label: String,
    #[serde(rename = "jobs")]
    pub count: u32,
    pub cumulative: u32,
}

impl DayBucket {
    pub fn new(day: NaiveDate, locale: Locale) -> Self {
        Self {
            day,
            label: day_label(day, locale),
            count: 0,
            cumulative: 0,
        }
    }
}

/// Lays out one zeroed bucket per calendar day, oldest first, ending on the
/// UTC day of `now`.
pub fn plan_window(range: WindowRange, now: DateTime<Utc>, locale: Locale) -> Vec<DayBucket> {
    let today = now.date_naive();
    let days = range.days();

    (0..days)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|day| DayBucket::new(day, locale))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_from_token_known_and_unknown() {
        assert_eq!(WindowRange::from_token("7d"), WindowRange::Last7Days);
        assert_eq!(WindowRange::from_token("30d"), WindowRange::Last30Days);
        assert_eq!(WindowRange::from_token("90d"), WindowRange::Last90Days);
        assert_eq!(WindowRange::from_token("365d"), WindowRange::Last7Days);
        assert_eq!(WindowRange::from_token(""), WindowRange::Last7Days);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert!("1y".parse::<WindowRange>().is_err());
        assert_eq!("30d".parse::<WindowRange>().unwrap(), WindowRange::Last30Days);
    }

    #[test]
    fn test_plan_window_is_contiguous_and_ends_today() {
        let now = at(2024, 3, 2, 15);
        for range in WindowRange::ALL {
            let buckets = plan_window(range, now, Locale::en_US);
            assert_eq!(buckets.len(), range.days() as usize);
            assert_eq!(buckets.last().unwrap().day, now.date_naive());
            for pair in buckets.windows(2) {
                assert_eq!(pair[0].day.succ_opt().unwrap(), pair[1].day);
            }
            assert!(buckets.iter().all(|b| b.count == 0 && b.cumulative == 0));
        }
    }

    #[test]
    fn test_plan_window_crosses_month_and_leap_day() {
        let buckets = plan_window(WindowRange::Last7Days, at(2024, 3, 2, 0), Locale::en_US);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["25 Feb", "26 Feb", "27 Feb", "28 Feb", "29 Feb", "1 Mar", "2 Mar"]
        );
    }

    #[test]
    fn test_plan_window_late_evening_uses_utc_day() {
        let buckets = plan_window(WindowRange::Last7Days, at(2024, 1, 2, 23), Locale::en_US);
        assert_eq!(
            buckets.last().unwrap().day,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(
            buckets.first().unwrap().day,
            NaiveDate::from_ymd_opt(2023, 12, 27).unwrap()
        );
    }
}
