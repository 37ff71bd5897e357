use crate::areas::{is_zip5, DEFAULT_SERVICE_AREAS};
use crate::error::BizPulseError;

pub const DEFAULT_DATASET_URL: &str = "https://data.lacity.org/resource/r4uk-afju.json";
pub const DEFAULT_ROW_LIMIT: u32 = 5000;
const DEFAULT_WEB_HOST: &str = "127.0.0.1";
const DEFAULT_WEB_PORT: u16 = 3000;

/// Application configuration loaded from environment variables.
/// Every value defaults to the deployment constants, so an empty
/// environment is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Upstream dataset
    pub dataset_url: String,
    pub zip_codes: Vec<String>,
    pub row_limit: u32,
    pub socrata_app_token: Option<String>,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    pub fn defaults() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            zip_codes: DEFAULT_SERVICE_AREAS
                .iter()
                .map(|a| a.code.to_string())
                .collect(),
            row_limit: DEFAULT_ROW_LIMIT,
            socrata_app_token: None,
            web_host: DEFAULT_WEB_HOST.to_string(),
            web_port: DEFAULT_WEB_PORT,
        }
    }

    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, BizPulseError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        tracing::info!(
            dataset_url = %config.dataset_url,
            zip_codes = ?config.zip_codes,
            row_limit = config.row_limit,
            app_token = config.socrata_app_token.is_some(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BizPulseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::defaults();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let zip_codes = match var("BIZPULSE_ZIP_CODES") {
            Some(raw) => parse_zip_codes(&raw)?,
            None => defaults.zip_codes,
        };

        let row_limit = match var("BIZPULSE_ROW_LIMIT") {
            Some(raw) => raw.parse().map_err(|_| {
                BizPulseError::Config(format!("BIZPULSE_ROW_LIMIT must be a number, got {raw:?}"))
            })?,
            None => defaults.row_limit,
        };

        let web_port = match var("WEB_PORT") {
            Some(raw) => raw.parse().map_err(|_| {
                BizPulseError::Config(format!("WEB_PORT must be a number, got {raw:?}"))
            })?,
            None => defaults.web_port,
        };

        Ok(Self {
            dataset_url: var("BIZPULSE_DATASET_URL").unwrap_or(defaults.dataset_url),
            zip_codes,
            row_limit,
            socrata_app_token: var("SOCRATA_APP_TOKEN"),
            web_host: var("WEB_HOST").unwrap_or(defaults.web_host),
            web_port,
        })
    }
}

fn parse_zip_codes(raw: &str) -> Result<Vec<String>, BizPulseError> {
    let codes: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    if codes.is_empty() {
        return Err(BizPulseError::Config(
            "BIZPULSE_ZIP_CODES must list at least one zip code".to_string(),
        ));
    }
    if let Some(bad) = codes.iter().find(|c| !is_zip5(c)) {
        return Err(BizPulseError::Config(format!(
            "BIZPULSE_ZIP_CODES entries must be 5 digits, got {bad:?}"
        )));
    }
    Ok(codes)
}
