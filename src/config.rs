//! Runtime configuration.
//!
//! Everything has a sensible default; the API address and request timeout
//! can be overridden through the environment:
//!
//! - `SCRYFALL_BASE_URL` (default `https://api.scryfall.com`)
//! - `SCRYFALL_TIMEOUT_SECS` (default 30)

use crate::error::{ApiError, ApiResult};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";
pub const DEFAULT_USER_AGENT: &str = "D2D-Automations-CardBrowser/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BASE_URL_VAR: &str = "SCRYFALL_BASE_URL";
const TIMEOUT_VAR: &str = "SCRYFALL_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_VAR) {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ApiError::Config(format!(
                    "{BASE_URL_VAR} must be an http(s) URL, got '{url}'"
                )));
            }
            log::info!("Using Scryfall base URL from environment: {}", url);
            config.base_url = url;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("{TIMEOUT_VAR} must be a number of seconds, got '{raw}'"))
            })?;
            if secs == 0 {
                return Err(ApiError::Config(format!("{TIMEOUT_VAR} must be greater than 0")));
            }
            config.timeout = Duration::from_secs(secs);
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
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "https://api.scryfall.com");
    }

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("SCRYFALL_BASE_URL", "http://localhost:8080/")]))
                .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = AppConfig::from_lookup(lookup_from(&[("SCRYFALL_BASE_URL", "ftp://x")]));
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn timeout_override() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("SCRYFALL_TIMEOUT_SECS", "5")])).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_invalid_timeout() {
        for raw in ["abc", "0", "-1"] {
            let result = AppConfig::from_lookup(lookup_from(&[("SCRYFALL_TIMEOUT_SECS", raw)]));
            assert!(matches!(result, Err(ApiError::Config(_))), "accepted {raw}");
        }
    }
}
