// Keboola connection settings

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_STORAGE_HOST: &str = "https://connection.keboola.com";
pub const DEFAULT_SYRUP_HOST: &str = "https://syrup.keboola.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_STORAGE_API_TOKEN: &str = "KBC_STORAGE_API_TOKEN";
pub const ENV_STORAGE_HOST: &str = "KBC_STORAGE_HOST";
pub const ENV_SYRUP_HOST: &str = "KBC_SYRUP_HOST";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "KBC_REQUEST_TIMEOUT_SECS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Connection settings for the Storage API and the Syrup job queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KbcConfig {
    pub storage_api_token: String,
    pub storage_host: String,
    pub syrup_host: String,
    pub request_timeout: Duration,
}

impl KbcConfig {
    /// Settings with default hosts and timeout
    pub fn new(storage_api_token: impl Into<String>) -> Self {
        Self {
            storage_api_token: storage_api_token.into(),
            storage_host: DEFAULT_STORAGE_HOST.to_string(),
            syrup_host: DEFAULT_SYRUP_HOST.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Load settings from `KBC_*` environment variables
    ///
    /// # Environment Variables
    ///
    /// - `KBC_STORAGE_API_TOKEN`: Storage API token (required)
    /// - `KBC_STORAGE_HOST`: Storage API base URL (default: https://connection.keboola.com)
    /// - `KBC_SYRUP_HOST`: Syrup base URL (default: https://syrup.keboola.com)
    /// - `KBC_REQUEST_TIMEOUT_SECS`: per-request timeout (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_STORAGE_API_TOKEN)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_STORAGE_API_TOKEN))?;

        let mut config = Self::new(token);

        if let Some(host) = lookup(ENV_STORAGE_HOST) {
            config.storage_host = host;
        }
        if let Some(host) = lookup(ENV_SYRUP_HOST) {
            config.syrup_host = host;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                key: ENV_REQUEST_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = KbcConfig::from_lookup(lookup_from(&[("KBC_STORAGE_API_TOKEN", "tok")])).unwrap();
        assert_eq!(config, KbcConfig::new("tok"));
        assert_eq!(config.syrup_host, "https://syrup.keboola.com");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_token() {
        let err = KbcConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("KBC_STORAGE_API_TOKEN"));

        let err = KbcConfig::from_lookup(lookup_from(&[("KBC_STORAGE_API_TOKEN", " ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("KBC_STORAGE_API_TOKEN"));
    }

    #[test]
    fn test_overrides() {
        let config = KbcConfig::from_lookup(lookup_from(&[
            ("KBC_STORAGE_API_TOKEN", "tok"),
            ("KBC_STORAGE_HOST", "https://connection.eu-central-1.keboola.com"),
            ("KBC_SYRUP_HOST", "https://syrup.eu-central-1.keboola.com"),
            ("KBC_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.storage_host, "https://connection.eu-central-1.keboola.com");
        assert_eq!(config.syrup_host, "https://syrup.eu-central-1.keboola.com");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = KbcConfig::from_lookup(lookup_from(&[
            ("KBC_STORAGE_API_TOKEN", "tok"),
            ("KBC_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("KBC_REQUEST_TIMEOUT_SECS"));
    }
}
