//! Waypoint entity

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Minimum number of waypoints needed to calculate or share a route
pub const MIN_ROUTE_WAYPOINTS: usize = 2;

/// A user-designated stop on the route
///
/// Waypoints are immutable once created. Their position in the owning
/// list defines the traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(flatten)]
    location: GeoLocation,
    address: String,
}

impl Waypoint {
    /// Create a waypoint with a resolved address
    #[must_use]
    pub fn new(location: GeoLocation, address: impl Into<String>) -> Self {
        Self {
            location,
            address: address.into(),
        }
    }

    /// Create a waypoint labelled with its own coordinates
    ///
    /// Used when no address was supplied by the caller.
    #[must_use]
    pub fn with_placeholder(location: GeoLocation) -> Self {
        let address = format!(
            "Point {:.4}, {:.4}",
            location.latitude(),
            location.longitude()
        );
        Self { location, address }
    }

    /// Create a waypoint labelled with its sequence number
    ///
    /// Used when reverse geocoding a map click failed.
    #[must_use]
    pub fn unresolved(location: GeoLocation, sequence_number: usize) -> Self {
        Self {
            location,
            address: format!("Point {sequence_number}"),
        }
    }

    /// Get the coordinates
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.latitude()
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.longitude()
    }

    /// Get the display address
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether the waypoint at `index` is an intermediate stop in a list of `total`
    #[must_use]
    pub const fn is_checkpoint(index: usize, total: usize) -> bool {
        index > 0 && index + 1 < total
    }
}
