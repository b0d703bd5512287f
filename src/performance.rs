use serde::Serialize;

use crate::labels::truncate_label;
use crate::models::{JobRecord, SearchRecord};
use crate::summary::clamp_count;

pub const SEARCH_LABEL_MAX: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPerformanceEntry {
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "jobs")]
    pub match_count: u32,
    pub active: bool,
}

/// Counts, for every search, the jobs its keyword phrase matches. Ignores the
/// time window: the whole job set is scanned each time.
pub fn score_searches(searches: &[SearchRecord], jobs: &[JobRecord]) -> Vec<SearchPerformanceEntry> {
    searches
        .iter()
        .map(|search| {
            let needle = search.keywords.to_lowercase();
            SearchPerformanceEntry {
                label: truncate_label(&search.keywords, SEARCH_LABEL_MAX),
                match_count: clamp_count(jobs.iter().filter(|job| matches_job(&needle, job)).count()),
                active: search.is_active,
            }
        })
        .collect()
}

/// Case-insensitive containment in the title, or in the description when there
/// is one. `needle` is already lowercased; a blank phrase matches nothing.
fn matches_job(needle: &str, job: &JobRecord) -> bool {
    if needle.trim().is_empty() {
        return false;
    }
    if job.title.to_lowercase().contains(needle) {
        return true;
    }
    job.description
        .as_deref()
        .filter(|d| !d.is_empty())
        .is_some_and(|d| d.to_lowercase().contains(needle))
}
