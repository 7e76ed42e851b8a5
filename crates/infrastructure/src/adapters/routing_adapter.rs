//! Routing adapter - Implements RoutingPort using integration_routing

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{GeoLocation, RoutePoint};
use integration_routing::{OpenRouteServiceClient, OrsConfig, RoutingClient, RoutingError};
use tracing::{debug, instrument};

/// Adapter for route segments via OpenRouteService
#[derive(Debug)]
pub struct OrsRoutingAdapter {
    client: OpenRouteServiceClient,
}

impl OrsRoutingAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: &OrsConfig) -> Result<Self, ApplicationError> {
        let client = OpenRouteServiceClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn from_client(client: OpenRouteServiceClient) -> Self {
        Self { client }
    }
}

/// Map a routing client error to the application taxonomy
fn map_error(error: RoutingError) -> ApplicationError {
    match error {
        RoutingError::RateLimitExceeded => ApplicationError::RateLimited,
        RoutingError::MalformedResponse(_) | RoutingError::EmptyGeometry => {
            ApplicationError::InvalidResponse(format!("Routing response: {error}"))
        },
        RoutingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(format!("Routing failed: {other}")),
    }
}

/// Stand-in used when no routing provider is configured
///
/// Every request fails with a configuration error carrying `reason`.
#[derive(Debug, Clone)]
pub struct DisabledRoutingAdapter {
    reason: String,
}

impl DisabledRoutingAdapter {
    /// Create a disabled adapter
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl RoutingPort for DisabledRoutingAdapter {
    async fn route_segment(
        &self,
        _start: GeoLocation,
        _end: GeoLocation,
    ) -> Result<Vec<RoutePoint>, ApplicationError> {
        Err(ApplicationError::Configuration(format!(
            "Routing is disabled: {}",
            self.reason
        )))
    }
}

#[async_trait]
impl RoutingPort for OrsRoutingAdapter {
    #[instrument(skip(self), fields(start = %start, end = %end))]
    async fn route_segment(
        &self,
        start: GeoLocation,
        end: GeoLocation,
    ) -> Result<Vec<RoutePoint>, ApplicationError> {
        let points = self.client.directions(start, end).await.map_err(map_error)?;
        debug!(points = points.len(), "Route segment fetched");
        Ok(points)
    }
}
