use serde::Serialize;
use std::collections::HashMap;

use crate::labels::truncate_label;
use crate::models::{JobRecord, JobStatus};
use crate::summary::clamp_count;

pub const UNSPECIFIED_COMPANY: &str = "Non spécifié";
pub const TOP_COMPANIES: usize = 10;
pub const COMPANY_LABEL_MAX: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDistributionEntry {
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "value")]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyRankEntry {
    #[serde(rename = "company")]
    pub label: String,
    #[serde(rename = "jobs")]
    pub count: u32,
}

/// Counts jobs per recognized status, in enumeration order, dropping empty categories.
pub fn aggregate_status(jobs: &[JobRecord]) -> Vec<StatusDistributionEntry> {
    JobStatus::ALL
        .iter()
        .map(|status| StatusDistributionEntry {
            label: status.label().to_string(),
            count: clamp_count(jobs.iter().filter(|j| j.status == *status).count()),
        })
        .filter(|entry| entry.count > 0)
        .collect()
}

/// Top companies by job count. Ties keep the order in which companies first appear.
pub fn aggregate_companies(jobs: &[JobRecord]) -> Vec<CompanyRankEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, u32> = HashMap::new();

    for job in jobs {
        let company = company_key(job);
        let count = counts.entry(company).or_insert_with(|| {
            order.push(company);
            0
        });
        *count = count.saturating_add(1);
    }

    let mut ranked: Vec<(&str, u32)> = order.into_iter().map(|c| (c, counts[c])).collect();
    // stable sort keeps first-appearance order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_COMPANIES);

    ranked
        .into_iter()
        .map(|(company, count)| CompanyRankEntry {
            label: truncate_label(company, COMPANY_LABEL_MAX),
            count,
        })
        .collect()
}

fn company_key(job: &JobRecord) -> &str {
    job.company
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(UNSPECIFIED_COMPANY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn job(company: Option<&str>, status: JobStatus) -> JobRecord {
        JobRecord {
            company: company.map(String::from),
            status,
            ..Default::default()
        }
    }

    fn entry(label: &str, count: u32) -> CompanyRankEntry {
        CompanyRankEntry {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn test_status_distribution_enumeration_order_and_nonzero() {
        let jobs = vec![
            job(None, JobStatus::Rejected),
            job(None, JobStatus::Applied),
            job(None, JobStatus::Rejected),
            job(None, JobStatus::New),
            job(None, JobStatus::Unclassified),
        ];
        let dist = aggregate_status(&jobs);
        let pairs: Vec<(&str, u32)> = dist.iter().map(|e| (e.label.as_str(), e.count)).collect();
        assert_eq!(pairs, vec![("Nouveau", 1), ("Postulé", 1), ("Rejeté", 2)]);
    }

    #[test]
    fn test_status_distribution_sums_to_classified_jobs() {
        let jobs = vec![
            job(None, JobStatus::Saved),
            job(None, JobStatus::Interview),
            job(None, JobStatus::Unclassified),
            job(None, JobStatus::Unclassified),
        ];
        let dist = aggregate_status(&jobs);
        let total: u32 = dist.iter().map(|e| e.count).sum();
        let classified = jobs.iter().filter(|j| j.status != JobStatus::Unclassified).count() as u32;
        assert_eq!(total, classified);
        assert!(dist.iter().all(|e| e.count > 0));
    }

    #[test]
    fn test_status_distribution_empty() {
        assert!(aggregate_status(&[]).is_empty());
    }

    #[test]
    fn test_company_ranking_orders_by_count_then_first_seen() {
        let jobs = vec![
            job(Some("Beta"), JobStatus::New),
            job(Some("Acme"), JobStatus::New),
            job(Some("Gamma"), JobStatus::New),
            job(Some("Acme"), JobStatus::New),
            job(Some("Gamma"), JobStatus::New),
            job(Some("Delta"), JobStatus::New),
        ];
        assert_eq!(
            aggregate_companies(&jobs),
            vec![entry("Acme", 2), entry("Gamma", 2), entry("Beta", 1), entry("Delta", 1)]
        );
    }

    #[test]
    fn test_company_ranking_groups_missing_companies() {
        let jobs = vec![
            job(None, JobStatus::New),
            job(Some(""), JobStatus::New),
            job(Some("  "), JobStatus::New),
            job(Some("Acme"), JobStatus::New),
        ];
        assert_eq!(
            aggregate_companies(&jobs),
            vec![entry(UNSPECIFIED_COMPANY, 3), entry("Acme", 1)]
        );
    }

    #[test]
    fn test_company_ranking_caps_at_ten_and_truncates_labels() {
        let mut jobs: Vec<JobRecord> = (0..12)
            .map(|i| job(Some(&format!("Company {:02}", i)), JobStatus::New))
            .collect();
        jobs.push(job(Some("Compagnie Générale des Logiciels"), JobStatus::New));
        jobs.push(job(Some("Compagnie Générale des Logiciels"), JobStatus::New));

        let ranked = aggregate_companies(&jobs);
        assert_eq!(ranked.len(), TOP_COMPANIES);
        assert_eq!(ranked[0], entry("Compagnie Générale d...", 2));
        assert_eq!(ranked[1], entry("Company 00", 1));
        assert_eq!(ranked[9], entry("Company 08", 1));
        for pair in ranked.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }
}
