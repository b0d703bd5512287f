use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{JobRecord, JobsEnvelope, SearchRecord, SearchesEnvelope};

/// Where job and search records come from. The aggregation code only ever
/// sees the returned vectors.
pub trait RecordSource {
    fn fetch_jobs(&self) -> Result<Vec<JobRecord>>;
    fn fetch_searches(&self) -> Result<Vec<SearchRecord>>;
    fn describe(&self) -> String;
}

pub fn open_source(
    config: &Config,
    jobs_file: Option<PathBuf>,
    searches_file: Option<PathBuf>,
) -> Result<Box<dyn RecordSource>> {
    match (jobs_file, searches_file) {
        (Some(jobs), Some(searches)) => Ok(Box::new(FileSource::new(jobs, searches))),
        (None, None) => Ok(Box::new(ApiSource::new(config)?)),
        _ => Err(anyhow!("--jobs-file and --searches-file must be given together")),
    }
}

// --- HTTP API ---

pub struct ApiSource {
    client: reqwest::blocking::Client,
    base_url: String,
    jobs_limit: u32,
}

impl ApiSource {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            jobs_limit: config.jobs_limit(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(anyhow!("{} returned {}: {}", url, status, body.trim()));
        }

        response
            .json::<T>()
            .with_context(|| format!("Failed to decode response from {}", url))
    }
}

impl RecordSource for ApiSource {
    fn fetch_jobs(&self) -> Result<Vec<JobRecord>> {
        let envelope: JobsEnvelope =
            self.get_json("jobs", &[("limit", self.jobs_limit.to_string())])?;
        info!(count = envelope.jobs.len(), "fetched jobs");
        Ok(envelope.jobs)
    }

    fn fetch_searches(&self) -> Result<Vec<SearchRecord>> {
        let envelope: SearchesEnvelope = self.get_json("searches", &[])?;
        info!(count = envelope.searches.len(), "fetched searches");
        Ok(envelope.searches)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

// --- JSON files ---

/// Reads exported API responses. Each file holds either the API envelope
/// (`{"jobs": [...]}`) or a bare array.
pub struct FileSource {
    jobs_path: PathBuf,
    searches_path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<E, T> {
    Bare(Vec<T>),
    Envelope(E),
}

impl FileSource {
    pub fn new(jobs_path: PathBuf, searches_path: PathBuf) -> Self {
        Self {
            jobs_path,
            searches_path,
        }
    }
}

fn read_listing<E: DeserializeOwned, T: DeserializeOwned>(path: &Path) -> Result<Listing<E, T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

impl RecordSource for FileSource {
    fn fetch_jobs(&self) -> Result<Vec<JobRecord>> {
        let jobs = match read_listing::<JobsEnvelope, JobRecord>(&self.jobs_path)? {
            Listing::Bare(jobs) => jobs,
            Listing::Envelope(envelope) => envelope.jobs,
        };
        info!(count = jobs.len(), path = %self.jobs_path.display(), "loaded jobs");
        Ok(jobs)
    }

    fn fetch_searches(&self) -> Result<Vec<SearchRecord>> {
        let searches = match read_listing::<SearchesEnvelope, SearchRecord>(&self.searches_path)? {
            Listing::Bare(searches) => searches,
            Listing::Envelope(envelope) => envelope.searches,
        };
        info!(count = searches.len(), path = %self.searches_path.display(), "loaded searches");
        Ok(searches)
    }

    fn describe(&self) -> String {
        format!("{} + {}", self.jobs_path.display(), self.searches_path.display())
    }
}
