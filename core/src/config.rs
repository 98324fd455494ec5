//! Client configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::transport::DEFAULT_TIMEOUT;

pub const DEFAULT_BASE_URL: &str = "https://api.bush.uz";
pub const DEFAULT_STATE_FILE: &str = ".ecobonus/state.json";

pub const BASE_URL_VAR: &str = "ECOBONUS_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "ECOBONUS_TIMEOUT_SECS";
pub const STATE_FILE_VAR: &str = "ECOBONUS_STATE_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub state_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or blank
    /// variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let base_url = var(BASE_URL_VAR).unwrap_or_else(|| {
            info!("{BASE_URL_VAR} not set, using default: {DEFAULT_BASE_URL}");
            defaults.base_url.clone()
        });
        Self::validate_base_url(&base_url)?;

        let timeout = match var(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::Invalid {
                        key: TIMEOUT_VAR,
                        value: raw,
                        reason: "expected a positive number of seconds".to_string(),
                    })
                }
                Ok(secs) => Duration::from_secs(secs),
            },
            None => defaults.timeout,
        };

        let state_file = var(STATE_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.state_file);

        Ok(Self {
            base_url,
            timeout,
            state_file,
        })
    }

    /// Only absolute http(s) URLs are accepted.
    pub fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
        if base_url.starts_with("http://") || base_url.starts_with("https://") {
            return Ok(());
        }
        Err(ConfigError::Invalid {
            key: BASE_URL_VAR,
            value: base_url.to_string(),
            reason: "expected an http:// or https:// URL".to_string(),
        })
    }

    /// Replace the base URL, applying the same check as the environment value.
    pub fn with_base_url(mut self, base_url: String) -> Result<Self, ConfigError> {
        Self::validate_base_url(&base_url)?;
        self.base_url = base_url;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_read() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "http://127.0.0.1:3000"),
            (TIMEOUT_VAR, "3"),
            (STATE_FILE_VAR, "/tmp/eco.json"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.state_file, PathBuf::from("/tmp/eco.json"));
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[(BASE_URL_VAR, "  ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: TIMEOUT_VAR, .. }));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(BASE_URL_VAR, "ftp://x")])).unwrap_err();
        assert!(err.to_string().contains(BASE_URL_VAR));
    }

    #[test]
    fn base_url_override_is_validated() {
        let err = ClientConfig::default()
            .with_base_url("ftp://x".to_string())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: BASE_URL_VAR, .. }));

        let config = ClientConfig::default()
            .with_base_url("http://localhost:3000".to_string())
            .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
    }
}
