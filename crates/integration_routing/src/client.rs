//! OpenRouteService directions client
//!
//! Requests a driving path between two coordinates. Coordinates are sent
//! and received in `lon,lat` order and converted to latitude-first
//! [`RoutePoint`]s.

use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoLocation, RoutePoint};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::OrsConfig;
use crate::error::RoutingError;
use crate::models::{RawDirectionsResponse, RawErrorResponse};

/// Trait for routing service clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Fetch the drivable path from `start` to `end`
    async fn directions(
        &self,
        start: GeoLocation,
        end: GeoLocation,
    ) -> Result<Vec<RoutePoint>, RoutingError>;
}

/// OpenRouteService-based routing client
#[derive(Debug)]
pub struct OpenRouteServiceClient {
    client: Client,
    config: OrsConfig,
}

impl OpenRouteServiceClient {
    /// Create a new OpenRouteService client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OrsConfig) -> Result<Self, RoutingError> {
        config.validate().map_err(RoutingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("MeterRoute/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Format a location as the provider's `lon,lat` pair
    fn lon_lat(location: GeoLocation) -> String {
        format!("{},{}", location.longitude(), location.latitude())
    }

    /// Parse a raw directions body into route points
    fn parse_directions_response(body: &str) -> Result<Vec<RoutePoint>, RoutingError> {
        let raw: RawDirectionsResponse = serde_json::from_str(body)
            .map_err(|e| RoutingError::MalformedResponse(e.to_string()))?;

        raw.into_route_points()
    }

    /// Extract the provider error message from a failure body, if any
    fn parse_error_message(body: &str) -> Option<String> {
        serde_json::from_str::<RawErrorResponse>(body)
            .ok()
            .and_then(RawErrorResponse::into_message)
    }
}

#[async_trait]
impl RoutingClient for OpenRouteServiceClient {
    #[instrument(skip(self), fields(start = %start, end = %end))]
    async fn directions(
        &self,
        start: GeoLocation,
        end: GeoLocation,
    ) -> Result<Vec<RoutePoint>, RoutingError> {
        let url = self.config.directions_url();
        let params = [
            ("api_key", self.config.api_key.clone()),
            ("start", Self::lon_lat(start)),
            ("end", Self::lon_lat(end)),
        ];

        debug!(profile = %self.config.profile, "Requesting directions");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoutingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    // reqwest errors include the URL, which carries the API key
                    RoutingError::ConnectionFailed(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimitExceeded);
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::MalformedResponse(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = Self::parse_error_message(&body);
            warn!(status = status.as_u16(), ?message, "Directions request failed");
            return Err(RoutingError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let points = Self::parse_directions_response(&body)?;
        debug!(count = points.len(), "Directions received");
        Ok(points)
    }
}
