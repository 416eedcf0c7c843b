use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    API_KEY_ENV, DATAPOINT_API_BASE, DEFAULT_STATIONS_FILE, REQUEST_TIMEOUT,
    SITE_SPECIFIC_API_BASE, STATIONS_FILE_ENV,
};
use crate::error::ConfigError;

/// Process-wide settings, built once in `main` and shared with the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Met Office API key, sent with every upstream request
    pub api_key: String,
    /// Station directory, re-read on every lookup
    pub stations_path: PathBuf,
    /// DataPoint base URL (hourly observations)
    pub datapoint_base: String,
    /// Weather DataHub base URL (site-specific daily forecast)
    pub site_specific_base: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Config with the given key and default endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            stations_path: PathBuf::from(DEFAULT_STATIONS_FILE),
            datapoint_base: DATAPOINT_API_BASE.to_string(),
            site_specific_base: SITE_SPECIFIC_API_BASE.to_string(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// A missing or blank API key is an error; everything else falls back to
    /// its default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;

        let mut config = Self::new(api_key);
        if let Some(path) = lookup(STATIONS_FILE_ENV).filter(|p| !p.trim().is_empty()) {
            config.stations_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("MET_OFFICE_API_KEY"));
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[(API_KEY_ENV, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let cfg = Config::from_lookup(lookup_from(&[(API_KEY_ENV, "secret")])).unwrap();

        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.stations_path, PathBuf::from("stations.json"));
        assert_eq!(cfg.datapoint_base, DATAPOINT_API_BASE);
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn stations_path_can_be_overridden() {
        let cfg = Config::from_lookup(lookup_from(&[
            (API_KEY_ENV, "secret"),
            (STATIONS_FILE_ENV, "/srv/metoffice/sitelist.json"),
        ]))
        .unwrap();

        assert_eq!(cfg.stations_path, PathBuf::from("/srv/metoffice/sitelist.json"));
    }
}
