//! Integration configurations: Nominatim geocoding, OpenRouteService routing.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Geocoding Configuration
// ==============================

/// Geocoding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Nominatim API base URL
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,

    /// ISO country code restricting search results (default: "br")
    #[serde(default = "default_country_filter")]
    pub country_filter: String,

    /// Maximum suggestions per search (default: 5)
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,

    /// Preferred response language
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Minimum spacing between requests in milliseconds (default: 1000)
    #[serde(default = "default_min_request_interval")]
    pub min_request_interval_ms: u64,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout() -> u64 {
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

const fn default_min_request_interval() -> u64 {
    1000
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout(),
            country_filter: default_country_filter(),
            result_limit: default_result_limit(),
            accept_language: default_accept_language(),
            min_request_interval_ms: default_min_request_interval(),
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to `integration_geocoding::NominatimConfig`
    #[must_use]
    pub fn to_nominatim_config(&self) -> integration_geocoding::NominatimConfig {
        integration_geocoding::NominatimConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            country_filter: self.country_filter.clone(),
            result_limit: self.result_limit,
            accept_language: self.accept_language.clone(),
            min_request_interval_ms: self.min_request_interval_ms,
            ..Default::default()
        }
    }

    /// Validate the geocoding configuration
    pub fn validate(&self) -> Result<(), String> {
        self.to_nominatim_config()
            .validate()
            .map_err(|e| format!("geocoding: {e}"))
    }
}

// ==============================
// Routing Configuration
// ==============================

/// Routing service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingAppConfig {
    /// OpenRouteService API base URL
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,

    /// Routing profile (default: "driving-car")
    #[serde(default = "default_routing_profile")]
    pub profile: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_routing_timeout")]
    pub timeout_secs: u64,
}

fn default_routing_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_routing_profile() -> String {
    "driving-car".to_string()
}

const fn default_routing_timeout() -> u64 {
    15
}

impl Default for RoutingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            profile: default_routing_profile(),
            api_key: None,
            timeout_secs: default_routing_timeout(),
        }
    }
}

impl RoutingAppConfig {
    /// Whether an API key has been configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Convert to `integration_routing::OrsConfig`
    #[must_use]
    pub fn to_ors_config(&self) -> integration_routing::OrsConfig {
        integration_routing::OrsConfig {
            base_url: self.base_url.clone(),
            profile: self.profile.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().to_string())
                .unwrap_or_default(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Validate the routing configuration
    pub fn validate(&self) -> Result<(), String> {
        self.to_ors_config()
            .validate()
            .map_err(|e| format!("routing: {e}"))
    }
}
