//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `integrations`: Nominatim geocoding, OpenRouteService routing
//! - `map`: Initial viewport and tile layer for the browser page
//! - `planner`: Search debounce and viewport padding

mod integrations;
mod map;
mod planner;
mod server;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use integrations::{GeocodingAppConfig, RoutingAppConfig};
pub use map::{GeoLocationConfig, MapConfig};
pub use planner::PlannerAppConfig;
pub use server::ServerConfig;

/// Prefix of environment variables overriding configuration values
pub const ENV_PREFIX: &str = "METERROUTE";

/// Conventional environment variable holding the OpenRouteService key
pub const ROUTING_API_KEY_ENV: &str = "OPEN_ROUTE_API_KEY";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Routing service configuration
    #[serde(default)]
    pub routing: RoutingAppConfig,

    /// Map page configuration
    #[serde(default)]
    pub map: MapConfig,

    /// Planner session configuration
    #[serde(default)]
    pub planner: PlannerAppConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Sources in increasing priority: built-in defaults, an optional
    /// `config.toml` in the working directory, and `METERROUTE_`-prefixed
    /// variables with `__` between nested keys (e.g., `METERROUTE_SERVER__PORT`,
    /// `METERROUTE_ROUTING__API_KEY`). When no routing key is set by any of
    /// these, `OPEN_ROUTE_API_KEY` is used.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., METERROUTE_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        if !config.routing.has_api_key() {
            config.routing.api_key = std::env::var(ROUTING_API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from);
        }
        Ok(config)
    }

    /// Validate every section, reporting the first problem found
    ///
    /// The routing section is checked by [`RoutingAppConfig::validate`] on
    /// its own so that a missing API key only disables route calculation.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.geocoding.validate()?;
        self.map.validate()?;
        self.planner.validate()
    }

    /// Log a summary of the effective configuration (secrets excluded)
    pub fn log_summary(&self) {
        info!(
            bind = %self.server.bind_address(),
            geocoding = %self.geocoding.base_url,
            country = %self.geocoding.country_filter,
            routing = %self.routing.base_url,
            profile = %self.routing.profile,
            debounce_ms = self.planner.search_debounce_ms,
            "Configuration loaded"
        );
        if !self.routing.has_api_key() {
            warn!(
                "No routing API key configured; set {ROUTING_API_KEY_ENV} or {ENV_PREFIX}_ROUTING__API_KEY"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            routing: RoutingAppConfig {
                api_key: Some(SecretString::from("test-key")),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn default_config_is_valid_without_routing_key() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.routing.validate().is_err());
    }

    #[test]
    fn config_with_key_is_valid() {
        let config = valid_config();
        assert!(config.validate().is_ok());
        assert!(config.routing.validate().is_ok());
    }

    #[test]
    fn invalid_log_format_reported() {
        let mut config = valid_config();
        config.server.log_format = "yaml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("log_format"));
    }

    #[test]
    fn deserializes_partial_toml_like_source() {
        let source = config::Config::builder()
            .set_override("server.port", 8080)
            .unwrap()
            .set_override("routing.api_key", "from-file")
            .unwrap()
            .set_override("planner.search_debounce_ms", 250)
            .unwrap()
            .build()
            .unwrap();

        let config: AppConfig = source.try_deserialize().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.planner.search_debounce_ms, 250);
        assert_eq!(config.routing.to_ors_config().api_key, "from-file");
        assert_eq!(config.geocoding.country_filter, "br");
    }

    #[test]
    fn serialization_skips_secret() {
        let json = serde_json::to_string(&valid_config()).unwrap();
        assert!(!json.contains("test-key"));
    }
}
