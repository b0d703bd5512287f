use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::models::JobRecord;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Resolves the single calendar day (UTC) a job counts towards.
///
/// Candidates are tried in priority order `date_found`, `created_at`,
/// `date_posted`. The first non-blank one decides: if it does not parse the
/// job has no date, even when a later field would have parsed.
pub fn resolve_job_date(job: &JobRecord) -> Option<NaiveDate> {
    let (field, raw) = [
        ("date_found", &job.date_found),
        ("created_at", &job.created_at),
        ("date_posted", &job.date_posted),
    ]
    .into_iter()
    .find_map(|(field, value)| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| (field, v))
    })?;

    let day = parse_calendar_day(raw);
    if day.is_none() {
        debug!(job_id = %job.id, field, value = raw, "unparsable timestamp, job left out of time series");
    }
    day
}

/// Parses an API timestamp into a UTC calendar day.
///
/// Offsets are honoured; naive date-times (the backend's `isoformat()`
/// output) are taken as UTC.
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc().date());
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
