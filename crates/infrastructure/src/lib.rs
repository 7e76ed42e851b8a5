//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! Nominatim and OpenRouteService clients, and provides configuration
//! loading and logging initialisation for the server binary.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, GeoLocationConfig, GeocodingAppConfig, MapConfig, PlannerAppConfig,
    RoutingAppConfig, ServerConfig,
};
pub use telemetry::{DEFAULT_LOG_FILTER, LogFormat, TelemetryError, init_logging};
