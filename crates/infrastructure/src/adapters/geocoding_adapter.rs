//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::{AddressDetails, AddressSuggestion, GeoLocation};
use integration_geocoding::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter for address search and reverse geocoding via Nominatim
#[derive(Debug)]
pub struct NominatimGeocodingAdapter {
    client: NominatimGeocodingClient,
}

impl NominatimGeocodingAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn from_client(client: NominatimGeocodingClient) -> Self {
        Self { client }
    }
}

/// Map a geocoding client error to the application taxonomy
fn map_error(error: GeocodingError) -> ApplicationError {
    match error {
        GeocodingError::RateLimitExceeded => ApplicationError::RateLimited,
        GeocodingError::ParseError(msg) => {
            ApplicationError::InvalidResponse(format!("Geocoding response: {msg}"))
        },
        GeocodingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(format!("Geocoding failed: {other}")),
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn search_addresses(
        &self,
        query: &str,
    ) -> Result<Vec<AddressSuggestion>, ApplicationError> {
        let suggestions = self.client.search(query).await.map_err(map_error)?;
        debug!(count = suggestions.len(), "Address search completed");
        Ok(suggestions)
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn reverse_geocode(
        &self,
        location: GeoLocation,
    ) -> Result<AddressDetails, ApplicationError> {
        self.client
            .reverse_geocode(location.latitude(), location.longitude())
            .await
            .map_err(map_error)
    }
}
