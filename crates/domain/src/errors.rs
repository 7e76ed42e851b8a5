//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A route needs at least two waypoints
    #[error("At least {required} waypoints are required, got {actual}")]
    InsufficientWaypoints {
        /// Minimum number of waypoints
        required: usize,
        /// Number of waypoints available
        actual: usize,
    },
}

impl DomainError {
    /// Create an insufficient waypoints error for the route minimum
    #[must_use]
    pub const fn insufficient_waypoints(actual: usize) -> Self {
        Self::InsufficientWaypoints {
            required: crate::entities::MIN_ROUTE_WAYPOINTS,
            actual,
        }
    }
}
