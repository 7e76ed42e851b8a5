//! Nominatim client configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Country code filter (e.g., "br" for Brazil)
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Maximum number of suggestions per search
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,

    /// Preferred response language
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// User agent sent with every request (required by the Nominatim usage policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum spacing between two requests in milliseconds (0 disables)
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

fn default_country_filter() -> String {
    "br".to_string()
}

const fn default_result_limit() -> u8 {
    5
}

fn default_accept_language() -> String {
    "pt-BR,pt,en".to_string()
}

fn default_user_agent() -> String {
    format!("MeterRoute/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_min_request_interval_ms() -> u64 {
    1000
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            country_filter: default_country_filter(),
            result_limit: default_result_limit(),
            accept_language: default_accept_language(),
            user_agent: default_user_agent(),
            min_request_interval_ms: default_min_request_interval_ms(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            min_request_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url is not a valid URL: {e}"))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err("base_url must use http or https".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.result_limit == 0 || self.result_limit > 50 {
            return Err("result_limit must be between 1 and 50".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.country_filter, "br");
        assert_eq!(config.result_limit, 5);
        assert_eq!(config.min_request_interval_ms, 1000);
        assert!(config.user_agent.starts_with("MeterRoute/"));
    }

    #[test]
    fn test_testing_config() {
        let config = NominatimConfig::for_testing();
        assert_eq!(config.min_request_interval_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let config = NominatimConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = NominatimConfig {
            base_url: "ftp://nominatim.example".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("http"));

        let config = NominatimConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = NominatimConfig {
            result_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = NominatimConfig {
            user_agent: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: NominatimConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:8080"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.country_filter, "br");
        assert_eq!(config.result_limit, 5);
    }
}
