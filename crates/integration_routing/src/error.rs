//! Routing error types

use thiserror::Error;

/// Errors that can occur while fetching directions
///
/// Every failure mode has its own variant so callers never mistake a
/// failure for an empty route.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection to the routing service failed
    #[error("Routing connection failed: {0}")]
    ConnectionFailed(String),

    /// Routing service answered with a non-success status
    #[error("Routing request failed: HTTP {status}{}", provider_message(.message.as_deref()))]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Provider error message, if any
        message: Option<String>,
    },

    /// Rate limit exceeded
    #[error("Routing rate limit exceeded")]
    RateLimitExceeded,

    /// Response body lacks the expected geometry
    #[error("Malformed routing response: {0}")]
    MalformedResponse(String),

    /// Geometry was present but contained no coordinates
    #[error("Routing response contained no coordinates")]
    EmptyGeometry,

    /// Request timeout
    #[error("Routing request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Routing configuration error: {0}")]
    ConfigurationError(String),
}

fn provider_message(message: Option<&str>) -> String {
    message.map(|m| format!(" ({m})")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = RoutingError::HttpStatus {
            status: 404,
            message: Some("Could not find routable point".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Routing request failed: HTTP 404 (Could not find routable point)"
        );

        let err = RoutingError::HttpStatus {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Routing request failed: HTTP 500");
    }

    #[test]
    fn test_error_display() {
        assert!(RoutingError::EmptyGeometry.to_string().contains("no coordinates"));
        assert!(
            RoutingError::MalformedResponse("missing features".to_string())
                .to_string()
                .contains("missing features")
        );
        assert!(
            RoutingError::Timeout { timeout_secs: 15 }
                .to_string()
                .contains("15")
        );
    }
}
