//! Start-up configuration read from the process environment.
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! use commandr::AppConfig;
//!
//! let vars = HashMap::from([("COHERE_API_KEY", "co-key"), ("COMMANDR_CHAT_HISTORY", "full")]);
//! let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
//!     .expect("config should load");
//!
//! assert_eq!(config.default_temperature, 0.7);
//! assert_eq!(config.request_timeout, Duration::from_secs(90));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use ccommon::DEFAULT_TEMPERATURE;
use cobserve::{DEFAULT_LOG_FILTER, LoggingConfig};
use cprovider::SecretString;
use cprovider::adapters::cohere::HistoryPolicy;

pub const API_KEY_VAR: &str = "COHERE_API_KEY";
pub const BASE_URL_VAR: &str = "COHERE_BASE_URL";
pub const MODEL_VAR: &str = "COHERE_MODEL";
pub const TEMPERATURE_VAR: &str = "COMMANDR_TEMPERATURE";
pub const REQUEST_TIMEOUT_VAR: &str = "COMMANDR_REQUEST_TIMEOUT_SECS";
pub const CHAT_HISTORY_VAR: &str = "COMMANDR_CHAT_HISTORY";
pub const LOG_VAR: &str = "COMMANDR_LOG";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: String,
    pub message: String,
}

impl ConfigError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: SecretString,
    /// `None` uses the public Cohere endpoint.
    pub base_url: Option<String>,
    /// `None` lets the API pick its default model.
    pub model: Option<String>,
    pub default_temperature: f64,
    pub request_timeout: Duration,
    pub history_policy: HistoryPolicy,
    pub log_filter: String,
}

impl AppConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            base_url: None,
            model: None,
            default_temperature: DEFAULT_TEMPERATURE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            history_policy: HistoryPolicy::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = read(API_KEY_VAR)
            .ok_or_else(|| ConfigError::new(API_KEY_VAR, "must be set to a Cohere API key"))?;
        let mut config = Self::new(api_key);

        config.base_url = read(BASE_URL_VAR).map(|url| url.trim_end_matches('/').to_string());
        config.model = read(MODEL_VAR);

        if let Some(value) = read(TEMPERATURE_VAR) {
            config.default_temperature = parse_temperature(&value)?;
        }

        if let Some(value) = read(REQUEST_TIMEOUT_VAR) {
            config.request_timeout = parse_timeout(&value)?;
        }

        if let Some(value) = read(CHAT_HISTORY_VAR) {
            config.history_policy = parse_history_policy(&value)?;
        }

        if let Some(value) = read(LOG_VAR) {
            config.log_filter = value;
        }

        Ok(config)
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig::new(self.log_filter.clone())
    }
}

fn parse_temperature(value: &str) -> Result<f64, ConfigError> {
    let temperature = value
        .parse::<f64>()
        .map_err(|_| ConfigError::new(TEMPERATURE_VAR, format!("'{value}' is not a number")))?;

    if !temperature.is_finite() {
        return Err(ConfigError::new(
            TEMPERATURE_VAR,
            format!("'{value}' is not a finite number"),
        ));
    }

    Ok(temperature)
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::new(REQUEST_TIMEOUT_VAR, "must be at least 1 second")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(_) => Err(ConfigError::new(
            REQUEST_TIMEOUT_VAR,
            format!("'{value}' is not a whole number of seconds"),
        )),
    }
}

fn parse_history_policy(value: &str) -> Result<HistoryPolicy, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "latest" => Ok(HistoryPolicy::LatestOnly),
        "full" => Ok(HistoryPolicy::Full),
        _ => Err(ConfigError::new(
            CHAT_HISTORY_VAR,
            format!("'{value}' must be 'latest' or 'full'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_api_key_is_reported_by_name() {
        let error = load(&[]).expect_err("api key is required");
        assert_eq!(error.key, API_KEY_VAR);

        let blank = load(&[(API_KEY_VAR, "   ")]).expect_err("blank key counts as unset");
        assert_eq!(blank.key, API_KEY_VAR);
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = load(&[(API_KEY_VAR, "co-key")]).expect("config should load");

        assert_eq!(config.api_key.expose(), "co-key");
        assert_eq!(config.base_url, None);
        assert_eq!(config.model, None);
        assert_eq!(config.default_temperature, 0.7);
        assert_eq!(config.request_timeout, Duration::from_secs(90));
        assert_eq!(config.history_policy, HistoryPolicy::LatestOnly);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn every_override_is_applied() {
        let config = load(&[
            (API_KEY_VAR, "co-key"),
            (BASE_URL_VAR, "http://localhost:8080/v1/"),
            (MODEL_VAR, "command-r-plus"),
            (TEMPERATURE_VAR, "0.2"),
            (REQUEST_TIMEOUT_VAR, "15"),
            (CHAT_HISTORY_VAR, "FULL"),
            (LOG_VAR, "commandr=debug"),
        ])
        .expect("config should load");

        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(config.model.as_deref(), Some("command-r-plus"));
        assert_eq!(config.default_temperature, 0.2);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.history_policy, HistoryPolicy::Full);
        assert_eq!(config.logging().filter, "commandr=debug");
    }

    #[test]
    fn out_of_range_temperature_is_left_for_the_api() {
        let config = load(&[(API_KEY_VAR, "co-key"), (TEMPERATURE_VAR, "3.5")])
            .expect("range is not checked locally");
        assert_eq!(config.default_temperature, 3.5);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let cases = [
            (TEMPERATURE_VAR, "warm"),
            (TEMPERATURE_VAR, "NaN"),
            (REQUEST_TIMEOUT_VAR, "0"),
            (REQUEST_TIMEOUT_VAR, "1.5"),
            (CHAT_HISTORY_VAR, "some"),
        ];

        for (key, value) in cases {
            let error = load(&[(API_KEY_VAR, "co-key"), (key, value)])
                .expect_err("malformed value should fail");
            assert_eq!(error.key, key, "value {value}");
        }
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = load(&[(API_KEY_VAR, "co-very-secret")]).expect("config should load");
        assert!(!format!("{config:?}").contains("co-very-secret"));
    }
}
