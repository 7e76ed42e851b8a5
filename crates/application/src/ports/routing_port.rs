//! Routing service port
//!
//! Defines the interface for fetching the driving path between two points.

use async_trait::async_trait;
use domain::{GeoLocation, RoutePoint};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for routing services
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Fetch the path from `start` to `end`
    ///
    /// Points are latitude-first and in travel order. An empty geometry is
    /// reported as an error, never as an empty list.
    async fn route_segment(
        &self,
        start: GeoLocation,
        end: GeoLocation,
    ) -> Result<Vec<RoutePoint>, ApplicationError>;
}
