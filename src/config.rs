//! Runtime settings, read from the environment (and `.env`) once at startup.

use crate::error::{Result, SwuError};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.swu-db.com/cards";
pub const DEFAULT_DATABASE_DIR: &str = "database";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const CARDS_JSON_FILE: &str = "swu_cards.json";
pub const CARDS_CSV_FILE: &str = "swu_cards.csv";
pub const BY_SET_DIR: &str = "by_set";
pub const STATISTICS_FILE: &str = "statistics.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    /// Listing page scraped for set codes. Discovery is skipped when unset.
    pub sets_page_url: Option<String>,
    pub database_dir: PathBuf,
    /// Pause after every card request.
    pub request_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            sets_page_url: None,
            database_dir: PathBuf::from(DEFAULT_DATABASE_DIR),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Settings::default();

        let api_base_url = match env::var("SWU_API_BASE_URL") {
            Ok(value) => validate_url("SWU_API_BASE_URL", &value)?,
            Err(_) => defaults.api_base_url,
        };
        let sets_page_url = match env::var("SWU_SETS_PAGE_URL") {
            Ok(value) if !value.trim().is_empty() => {
                Some(validate_url("SWU_SETS_PAGE_URL", &value)?)
            }
            _ => None,
        };
        let database_dir = env::var("SWU_DATABASE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.database_dir);
        let request_delay = match env::var("SWU_REQUEST_DELAY_MS") {
            Ok(value) => Duration::from_millis(parse_number("SWU_REQUEST_DELAY_MS", &value)?),
            Err(_) => defaults.request_delay,
        };
        let request_timeout = match env::var("SWU_REQUEST_TIMEOUT_SECS") {
            Ok(value) => Duration::from_secs(parse_number("SWU_REQUEST_TIMEOUT_SECS", &value)?),
            Err(_) => defaults.request_timeout,
        };

        Ok(Settings {
            api_base_url,
            sets_page_url,
            database_dir,
            request_delay,
            request_timeout,
        })
    }

    pub fn cards_json_path(&self) -> PathBuf {
        self.database_dir.join(CARDS_JSON_FILE)
    }

    pub fn cards_csv_path(&self) -> PathBuf {
        self.database_dir.join(CARDS_CSV_FILE)
    }

    pub fn by_set_dir(&self) -> PathBuf {
        self.database_dir.join(BY_SET_DIR)
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.database_dir.join(STATISTICS_FILE)
    }
}

fn validate_url(var: &str, value: &str) -> Result<String> {
    let trimmed = value.trim().trim_end_matches('/');
    Url::parse(trimmed)
        .map_err(|e| SwuError::Config(format!("{} is not a valid URL ({}): {}", var, value, e)))?;
    Ok(trimmed.to_string())
}

fn parse_number(var: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| SwuError::Config(format!("{} must be a non-negative integer, got {:?}", var, value)))
}
