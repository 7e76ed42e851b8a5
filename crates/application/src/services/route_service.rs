//! Route pipeline
//!
//! Fetches one segment per consecutive waypoint pair, one request at a
//! time, and concatenates the segments into a single polyline with a
//! padded viewport region.

use std::fmt;
use std::sync::Arc;

use domain::{BoundsPadding, DomainError, MIN_ROUTE_WAYPOINTS, Route, Waypoint};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::RoutingPort;

/// Calculates multi-segment routes over an ordered waypoint list
pub struct RouteService {
    routing: Arc<dyn RoutingPort>,
    padding: BoundsPadding,
}

impl fmt::Debug for RouteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteService")
            .field("padding", &self.padding)
            .finish_non_exhaustive()
    }
}

impl RouteService {
    /// Create a route service with the default viewport padding
    #[must_use]
    pub fn new(routing: Arc<dyn RoutingPort>) -> Self {
        Self {
            routing,
            padding: BoundsPadding::default(),
        }
    }

    /// Override the viewport padding
    #[must_use]
    pub const fn with_padding(mut self, padding: BoundsPadding) -> Self {
        self.padding = padding;
        self
    }

    /// Calculate the route visiting `waypoints` in order
    ///
    /// Fails before any network call when fewer than two waypoints are
    /// given. The first failing segment aborts the calculation and its
    /// partial results are discarded.
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    pub async fn calculate_route(&self, waypoints: &[Waypoint]) -> Result<Route, ApplicationError> {
        if waypoints.len() < MIN_ROUTE_WAYPOINTS {
            return Err(DomainError::insufficient_waypoints(waypoints.len()).into());
        }

        let total = waypoints.len() - 1;
        let mut segments = Vec::with_capacity(total);

        for (index, pair) in waypoints.windows(2).enumerate() {
            let (from, to) = (&pair[0], &pair[1]);
            debug!(segment = index + 1, total, from = %from.address(), to = %to.address(), "Fetching route segment");

            let segment = self
                .routing
                .route_segment(from.location(), to.location())
                .await
                .map_err(|e| {
                    warn!(segment = index + 1, total, error = %e, "Route segment failed");
                    ApplicationError::route_segment(index + 1, total, e)
                })?;

            segments.push(segment);
        }

        let route = Route::from_segments(segments, self.padding).ok_or_else(|| {
            ApplicationError::InvalidResponse("Routing service returned no geometry".to_string())
        })?;

        info!(
            segments = route.segments,
            points = route.points.len(),
            length_km = route.length_km(),
            "Route calculated"
        );

        Ok(route)
    }
}
