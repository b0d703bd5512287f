use anyhow::{Context, Result};
use chrono::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::labels::{parse_locale, DEFAULT_LOCALE};
use crate::window::WindowRange;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
/// The backend refuses to return more than this many jobs per request.
pub const MAX_JOBS_LIMIT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub jobs_limit: u32,
    pub default_range: String,
    pub locale: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            jobs_limit: MAX_JOBS_LIMIT,
            default_range: WindowRange::default().token().to_string(),
            locale: "fr_FR".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Loads `path` if given (it must exist), otherwise the per-user config
    /// file if there is one, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "jobdash")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("JOBDASH_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(locale) = lookup("JOBDASH_LOCALE").filter(|v| !v.trim().is_empty()) {
            self.locale = locale;
        }
    }

    pub fn range(&self) -> WindowRange {
        WindowRange::from_token(&self.default_range)
    }

    pub fn chrono_locale(&self) -> Locale {
        parse_locale(&self.locale).unwrap_or_else(|| {
            warn!(locale = %self.locale, "unknown locale, falling back to fr_FR");
            DEFAULT_LOCALE
        })
    }

    pub fn jobs_limit(&self) -> u32 {
        self.jobs_limit.clamp(1, MAX_JOBS_LIMIT)
    }
}
