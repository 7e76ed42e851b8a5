//! Nominatim geocoding client
//!
//! Converts free-form address strings to ranked candidates and coordinates
//! to address breakdowns using the [Nominatim](https://nominatim.openstreetmap.org)
//! API (OpenStreetMap).
//!
//! Requests are spaced according to the Nominatim usage policy
//! (max 1 request/second by default).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::{AddressDetails, AddressSuggestion};
use reqwest::{Client, Response, StatusCode};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::config::NominatimConfig;
use crate::error::GeocodingError;
use crate::models::{RawReverseResult, RawSearchResult};

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search address candidates for a free-text query, in provider rank order
    ///
    /// An empty query yields an empty list without contacting the service.
    async fn search(&self, query: &str) -> Result<Vec<AddressSuggestion>, GeocodingError>;

    /// Convert coordinates to an address breakdown
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AddressDetails, GeocodingError>;
}

/// Nominatim-based geocoding client with request spacing
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        config
            .validate()
            .map_err(GeocodingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Enforce the configured minimum spacing between requests
    async fn rate_limit(&self) {
        let interval = Duration::from_millis(self.config.min_request_interval_ms);
        if interval.is_zero() {
            return;
        }

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Send a GET request and check the response status
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Response, GeocodingError> {
        self.rate_limit().await;

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeocodingError::HttpStatus {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Parse a raw `/search` body into suggestions, keeping provider order
    fn parse_search_response(body: &str) -> Result<Vec<AddressSuggestion>, GeocodingError> {
        let raw: Vec<RawSearchResult> =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        raw.into_iter()
            .map(RawSearchResult::into_suggestion)
            .collect()
    }

    /// Parse a raw `/reverse` body into an address breakdown
    fn parse_reverse_response(
        body: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<AddressDetails, GeocodingError> {
        let raw: RawReverseResult =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        if let Some(error) = raw.error {
            debug!(%error, "Nominatim could not reverse geocode");
            return Err(GeocodingError::AddressNotFound(format!(
                "{latitude},{longitude}"
            )));
        }

        raw.address
            .map(AddressDetails::from)
            .ok_or_else(|| GeocodingError::ParseError("Missing address breakdown".to_string()))
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<AddressSuggestion>, GeocodingError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.config.base_url);
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", self.config.result_limit.to_string()),
            ("addressdetails", "1".to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%query, "Searching addresses");

        let body = self
            .get(&url, &params)
            .await?
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let suggestions = Self::parse_search_response(&body)?;
        debug!(count = suggestions.len(), "Address suggestions found");
        Ok(suggestions)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AddressDetails, GeocodingError> {
        let url = format!("{}/reverse", self.config.base_url);
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("format", "jsonv2".to_string()),
            ("addressdetails", "1".to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ];

        debug!(%latitude, %longitude, "Reverse geocoding");

        let body = self
            .get(&url, &params)
            .await?
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Self::parse_reverse_response(&body, latitude, longitude)
    }
}
