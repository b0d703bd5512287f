use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Record identifiers are opaque; the API hands out integers but nothing
/// here depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64().map(RecordId::Int).unwrap_or_else(|| RecordId::Text(n.to_string())),
            Value::String(s) => RecordId::Text(s),
            _ => RecordId::default(),
        })
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    New,
    Saved,
    Applied,
    Interview,
    Rejected,
    #[default]
    Unclassified,
}

impl JobStatus {
    /// Recognized statuses in display order. `Unclassified` is deliberately absent.
    pub const ALL: [JobStatus; 5] = [
        JobStatus::New,
        JobStatus::Saved,
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Rejected,
    ];

    /// Exact, case-sensitive match against the canonical wire values.
    pub fn parse(value: &str) -> Self {
        match value {
            "new" => JobStatus::New,
            "saved" => JobStatus::Saved,
            "applied" => JobStatus::Applied,
            "interview" => JobStatus::Interview,
            "rejected" => JobStatus::Rejected,
            _ => JobStatus::Unclassified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::New => "Nouveau",
            JobStatus::Saved => "Sauvegardé",
            JobStatus::Applied => "Postulé",
            JobStatus::Interview => "Entretien",
            JobStatus::Rejected => "Rejeté",
            JobStatus::Unclassified => "Non défini",
        }
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => JobStatus::parse(&raw),
            _ => JobStatus::Unclassified,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "linkedin")]
    LinkedIn,
    #[serde(rename = "indeed")]
    Indeed,
    #[serde(rename = "welcome-to-the-jungle")]
    WelcomeToTheJungle,
    #[serde(other)]
    Unknown,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Indeed => "Indeed",
            Platform::WelcomeToTheJungle => "Welcome to the Jungle",
            Platform::Unknown => "Autre",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Alternance,
    Stage,
    Cdi,
    Cdd,
    Freelance,
    #[serde(other)]
    Unknown,
}

impl JobType {
    pub fn label(&self) -> &'static str {
        match self {
            JobType::Alternance => "alternance",
            JobType::Stage => "stage",
            JobType::Cdi => "cdi",
            JobType::Cdd => "cdd",
            JobType::Freelance => "freelance",
            JobType::Unknown => "autre",
        }
    }
}

/// A job posting as served by the crawler API. Read-only here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "WireJobRecord")]
pub struct JobRecord {
    pub id: RecordId,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub salary: Option<String>,
    pub platform: Option<String>,
    pub job_type: Option<String>,
    pub status: JobStatus,
    pub date_found: Option<String>,
    pub created_at: Option<String>,
    pub date_posted: Option<String>,
}

// Exports may carry both the dashboard names and the backend's
// `description_snippet` / `salary_info`; the dashboard name wins.
#[derive(Deserialize)]
struct WireJobRecord {
    #[serde(default)]
    id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    description_snippet: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    salary: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    salary_info: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    platform: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    job_type: Option<String>,
    #[serde(default)]
    status: JobStatus,
    #[serde(default, deserialize_with = "lenient_string")]
    date_found: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    date_posted: Option<String>,
}

impl From<WireJobRecord> for JobRecord {
    fn from(wire: WireJobRecord) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            company: wire.company,
            location: wire.location,
            description: wire.description.or(wire.description_snippet),
            url: wire.url,
            salary: wire.salary.or(wire.salary_info),
            platform: wire.platform,
            job_type: wire.job_type,
            status: wire.status,
            date_found: wire.date_found,
            created_at: wire.created_at,
            date_posted: wire.date_posted,
        }
    }
}

/// A configured crawl. `keywords` is required by the API but may still arrive empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRecord {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub keywords: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_list")]
    pub platforms: Vec<Platform>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub job_types: Vec<JobType>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub duration_minutes: Option<u32>,
    /// Jobs the backend has stored for this search.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_jobs: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_run: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobsEnvelope {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchesEnvelope {
    #[serde(default)]
    pub searches: Vec<SearchRecord>,
}

// A field of the wrong JSON type reads as absent instead of failing the
// whole listing.

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
