//! Map click resolution
//!
//! Turns a clicked coordinate into a labelled waypoint. Reverse geocoding
//! failures never prevent the waypoint from being added: the waypoint gets
//! a numbered fallback label and the caller receives a warning instead.

use std::fmt;
use std::sync::Arc;

use domain::{GeoLocation, Waypoint};
use tracing::{debug, instrument, warn};

use crate::ports::GeocodingPort;

/// Outcome of reverse geocoding a clicked coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressResolution {
    /// The provider returned an address
    Resolved(String),
    /// The lookup failed; `reason` describes why
    Fallback {
        /// Failure description shown to the user
        reason: String,
    },
}

impl AddressResolution {
    /// Build the waypoint, using `sequence_number` for the fallback label
    ///
    /// Returns the waypoint and, for a failed lookup, a non-fatal warning.
    #[must_use]
    pub fn into_waypoint(
        self,
        location: GeoLocation,
        sequence_number: usize,
    ) -> (Waypoint, Option<String>) {
        match self {
            Self::Resolved(label) => (Waypoint::new(location, label), None),
            Self::Fallback { reason } => (
                Waypoint::unresolved(location, sequence_number),
                Some(format!("Could not resolve address: {reason}")),
            ),
        }
    }
}

/// Resolves map clicks into waypoint labels
pub struct WaypointResolver {
    geocoding: Arc<dyn GeocodingPort>,
}

impl fmt::Debug for WaypointResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaypointResolver").finish_non_exhaustive()
    }
}

impl WaypointResolver {
    /// Create a resolver backed by a geocoding port
    #[must_use]
    pub fn new(geocoding: Arc<dyn GeocodingPort>) -> Self {
        Self { geocoding }
    }

    /// Reverse-geocode `location` into a display label
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    pub async fn resolve(&self, location: GeoLocation) -> AddressResolution {
        match self.geocoding.reverse_geocode(location).await {
            Ok(details) => {
                let label = details.format_label();
                debug!(label = %label, "Resolved clicked location");
                AddressResolution::Resolved(label)
            },
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed, using fallback label");
                AddressResolution::Fallback {
                    reason: e.to_string(),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::AddressDetails;

    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::MockGeocodingPort;

    fn brasilia() -> GeoLocation {
        GeoLocation::new(-15.779_72, -47.929_72).unwrap()
    }

    #[tokio::test]
    async fn resolved_click_uses_formatted_address() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_reverse_geocode().times(1).returning(|_| {
            Ok(AddressDetails {
                road: Some("Eixo Monumental".to_string()),
                house_number: None,
                neighbourhood: Some("Asa Sul".to_string()),
                city: Some("Brasília".to_string()),
            })
        });
        let resolver = WaypointResolver::new(Arc::new(geocoding));

        let (waypoint, warning) = resolver.resolve(brasilia()).await.into_waypoint(brasilia(), 1);

        assert_eq!(waypoint.address(), "Eixo Monumental, S/N, Asa Sul - Brasília");
        assert_eq!(waypoint.location(), brasilia());
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn failed_lookup_falls_back_with_warning() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_reverse_geocode()
            .returning(|_| Err(ApplicationError::ExternalService("Request timed out".to_string())));
        let resolver = WaypointResolver::new(Arc::new(geocoding));

        let (waypoint, warning) = resolver.resolve(brasilia()).await.into_waypoint(brasilia(), 3);

        assert_eq!(waypoint.address(), "Point 3");
        assert!(warning.unwrap().contains("Request timed out"));
    }

    #[test]
    fn fallback_label_uses_sequence_number_given_at_append_time() {
        let resolution = AddressResolution::Fallback {
            reason: "offline".to_string(),
        };
        let (waypoint, _) = resolution.into_waypoint(brasilia(), 7);
        assert_eq!(waypoint.address(), "Point 7");
    }
}
