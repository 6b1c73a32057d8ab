use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

use crate::spatial_matcher::Tolerances;

fn default_day_tolerance() -> f64 {
    Tolerances::default().day
}

fn default_time_tolerance() -> f64 {
    Tolerances::default().time
}

/// The env vars needed for scraping.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    timetable_snapshot_dir: PathBuf,
    class_name: Option<String>,
    #[serde(default)]
    class_subjects: Vec<String>,
    #[serde(default)]
    additional_subjects: Vec<String>,
    #[serde(default = "default_day_tolerance")]
    day_tolerance: f64,
    #[serde(default = "default_time_tolerance")]
    time_tolerance: f64,
}

#[derive(Debug)]
pub struct ScrapingConfig {
    pub snapshot_dir: PathBuf,
    pub class_name: Option<String>,
    pub class_subjects: Vec<String>,
    pub additional_subjects: Vec<String>,
    pub tolerances: Tolerances,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Self::from_env(scraping_env)
    }

    fn from_env(scraping_env: ScrapingEnv) -> anyhow::Result<Self> {
        let tolerances = Tolerances {
            day: scraping_env.day_tolerance,
            time: scraping_env.time_tolerance,
        };
        if !(tolerances.day > 0.0 && tolerances.time > 0.0) {
            anyhow::bail!("tolerances must be positive, got {tolerances:?}");
        }
        Ok(Self {
            snapshot_dir: scraping_env.timetable_snapshot_dir,
            class_name: scraping_env
                .class_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            class_subjects: clean_list(scraping_env.class_subjects),
            additional_subjects: clean_list(scraping_env.additional_subjects),
            tolerances,
        })
    }
}

// Comma separated env lists come back with padding and empty items.
fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn default_worksheet_name() -> String {
    "Schedule".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("schedule.json")
}

/// The env vars needed for publishing the assembled timetable.
#[derive(Debug, Deserialize)]
pub struct PublishingConfig {
    #[serde(default = "default_worksheet_name")]
    pub worksheet_name: String,
    pub sheets_api_url: Option<String>,
    pub sheets_access_token: Option<String>,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    pub entries_dump_path: Option<PathBuf>,
}

impl PublishingConfig {
    /// Spreadsheet endpoint and token, if both are configured.
    pub fn sheets_credentials(&self) -> Option<(&str, &str)> {
        match (&self.sheets_api_url, &self.sheets_access_token) {
            (Some(url), Some(token)) if !url.is_empty() && !token.is_empty() => {
                Some((url.as_str(), token.as_str()))
            }
            _ => None,
        }
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
