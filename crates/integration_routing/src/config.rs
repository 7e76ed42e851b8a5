//! OpenRouteService client configuration

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the OpenRouteService directions API
#[derive(Clone, Serialize, Deserialize)]
pub struct OrsConfig {
    /// Base URL for the OpenRouteService API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Routing profile (e.g., "driving-car")
    #[serde(default = "default_profile")]
    pub profile: String,

    /// API key sent as the `api_key` query parameter
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_profile() -> String {
    "driving-car".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            profile: default_profile(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for OrsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrsConfig")
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OrsConfig {
    /// Create a default configuration with the given API key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Directions endpoint for the configured profile
    #[must_use]
    pub fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}",
            self.base_url.trim_end_matches('/'),
            self.profile
        )
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

        if self.profile.is_empty() {
            return Err("profile must not be empty".to_string());
        }

        if self.api_key.trim().is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
