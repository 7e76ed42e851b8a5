//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Geocoding service answered with a non-success status
    #[error("Geocoding request failed: HTTP {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
    },

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Coordinates could not be resolved to an address
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Rate limit exceeded (Nominatim allows 1 request per second)
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Geocoding request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Geocoding configuration error: {0}")]
    ConfigurationError(String),
}
