//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (invalid coordinates, too few waypoints)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error (transport failure or error status)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// External service answered with a payload that could not be used
    #[error("Invalid response from external service: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded at the provider
    #[error("Rate limit exceeded")]
    RateLimited,

    /// A single route segment could not be calculated
    #[error("Route segment {segment} of {total} failed: {source}")]
    RouteSegment {
        /// 1-based index of the failing segment
        segment: usize,
        /// Number of segments in the route
        total: usize,
        /// Failure reported by the routing port
        #[source]
        source: Box<ApplicationError>,
    },

    /// Waypoints changed while the route was being calculated
    #[error("Waypoints changed while the route was being calculated")]
    StaleRoute,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Wrap a routing failure with the position of the failing segment
    #[must_use]
    pub fn route_segment(segment: usize, total: usize, source: Self) -> Self {
        Self::RouteSegment {
            segment,
            total,
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through route segment wrappers
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::RouteSegment { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
