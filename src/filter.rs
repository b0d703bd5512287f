use crate::models::{JobRecord, JobStatus};

/// Criteria from the jobs page. Blank text criteria and `status: None` match everything.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    /// Matched against title or company.
    pub search: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl JobFilter {
    pub fn matches(&self, job: &JobRecord) -> bool {
        if let Some(status) = self.status {
            if job.status != status {
                return false;
            }
        }

        let company = job.company.as_deref().unwrap_or("");

        if let Some(needle) = lowered(&self.search) {
            if !contains_ci(&job.title, &needle) && !contains_ci(company, &needle) {
                return false;
            }
        }

        if let Some(needle) = lowered(&self.company) {
            if !contains_ci(company, &needle) {
                return false;
            }
        }

        if let Some(needle) = lowered(&self.location) {
            match job.location.as_deref() {
                Some(location) if contains_ci(location, &needle) => {}
                _ => return false,
            }
        }

        true
    }

    pub fn apply<'a>(&self, jobs: &'a [JobRecord]) -> Vec<&'a JobRecord> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}

fn lowered(criterion: &Option<String>) -> Option<String> {
    criterion
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase)
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
