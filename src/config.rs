use dotenvy::dotenv;
use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COUNTRY_API_URL: &str = "https://restcountries.com/v3.1";
pub const DEFAULT_PAGE_SIZE: usize = 12;
/// Everything the listing and detail views render
pub const DEFAULT_COUNTRY_API_FIELDS: &str = "cca3,name,flags,capital,region,population,languages";

#[derive(Debug)]
pub enum ConfigError {
    MissingEnvVar(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingEnvVar(var) => write!(f, "Missing required environment variable: {}", var),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub country_api_url: String,
    pub account_api_url: String,

    pub page_size: NonZeroUsize,

    /// Appended as `?fields=` to catalogue and search requests
    pub country_api_fields: Vec<String>,

    pub session_file: PathBuf,
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// An explicit account API URL wins over ACCOUNT_API_URL and makes the
    /// variable optional.
    pub fn from_env(account_api_url: Option<String>) -> Result<Self, ConfigError> {
        dotenv().ok();

        let country_api_url = env::var("COUNTRY_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY_API_URL.to_string());

        let account_api_url = account_api_url
            .or_else(|| env::var("ACCOUNT_API_URL").ok().filter(|s| !s.is_empty()))
            .ok_or_else(|| ConfigError::MissingEnvVar("ACCOUNT_API_URL".to_string()))?;

        let page_size = match env::var("PAGE_SIZE").ok().filter(|s| !s.is_empty()) {
            Some(raw) => parse_page_size(&raw)?,
            None => NonZeroUsize::new(DEFAULT_PAGE_SIZE).ok_or_else(|| {
                ConfigError::InvalidValue("PAGE_SIZE: default must be non-zero".to_string())
            })?,
        };

        // Optional - comma-separated field names, e.g. "name,cca3,flags"
        let country_api_fields = parse_fields(env::var("COUNTRY_API_FIELDS").ok().as_deref());

        let session_file = match env::var("SESSION_FILE").ok().filter(|s| !s.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_session_file()?,
        };

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| ConfigError::InvalidValue(format!("REQUEST_TIMEOUT_SECS: {}", e)))
            })
            .transpose()?;

        Ok(Self {
            country_api_url,
            account_api_url,
            page_size,
            country_api_fields,
            session_file,
            request_timeout,
        })
    }
}

/// Split a COUNTRY_API_FIELDS value. Unset or blank falls back to the default list.
pub fn parse_fields(raw: Option<&str>) -> Vec<String> {
    let raw = raw
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_COUNTRY_API_FIELDS);
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn parse_page_size(raw: &str) -> Result<NonZeroUsize, ConfigError> {
    raw.trim()
        .parse::<NonZeroUsize>()
        .map_err(|e| ConfigError::InvalidValue(format!("PAGE_SIZE: {}", e)))
}

fn default_session_file() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("globe-explorer").join("session"))
        .ok_or_else(|| {
            ConfigError::MissingEnvVar("SESSION_FILE (no user config directory found)".to_string())
        })
}
