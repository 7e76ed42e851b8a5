//! Raw OpenRouteService response types

use domain::RoutePoint;
use serde::Deserialize;

use crate::error::RoutingError;

/// GeoJSON directions response
#[derive(Debug, Deserialize)]
pub(crate) struct RawDirectionsResponse {
    features: Option<Vec<RawFeature>>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: Option<Vec<Vec<f64>>>,
}

/// Error body returned with non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct RawErrorResponse {
    error: Option<RawErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawErrorDetail {
    Structured { message: Option<String> },
    Plain(String),
}

impl RawErrorResponse {
    pub(crate) fn into_message(self) -> Option<String> {
        match self.error? {
            RawErrorDetail::Structured { message } => message,
            RawErrorDetail::Plain(message) => Some(message),
        }
    }
}

impl RawDirectionsResponse {
    /// Decode `features[0].geometry.coordinates` (`[lon, lat]` pairs) into route points
    pub(crate) fn into_route_points(self) -> Result<Vec<RoutePoint>, RoutingError> {
        let coordinates = self
            .features
            .and_then(|features| features.into_iter().next())
            .ok_or_else(|| RoutingError::MalformedResponse("missing features".to_string()))?
            .geometry
            .ok_or_else(|| RoutingError::MalformedResponse("missing geometry".to_string()))?
            .coordinates
            .ok_or_else(|| RoutingError::MalformedResponse("missing coordinates".to_string()))?;

        if coordinates.is_empty() {
            return Err(RoutingError::EmptyGeometry);
        }

        coordinates
            .into_iter()
            .enumerate()
            .map(|(i, position)| match position.as_slice() {
                // Elevation, when requested, is a third element and is ignored
                [lon, lat, ..] => Ok(RoutePoint::from_lon_lat([*lon, *lat])),
                _ => Err(RoutingError::MalformedResponse(format!(
                    "coordinate {i} has fewer than two values"
                ))),
            })
            .collect()
    }
}
