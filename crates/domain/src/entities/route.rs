//! Route geometry entities
//!
//! A [`Route`] is the ordered concatenation of the segments returned by the
//! routing provider, together with the [`BoundingRegion`] used to fit the
//! map viewport.

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A single vertex of a route polyline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    /// Latitude in degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl RoutePoint {
    /// Create a new route point
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a route point from `[longitude, latitude]` wire order
    #[must_use]
    pub const fn from_lon_lat([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<GeoLocation> for RoutePoint {
    fn from(location: GeoLocation) -> Self {
        Self::new(location.latitude(), location.longitude())
    }
}

/// Padding applied to a bounding region before fitting the viewport
///
/// The margin on each side is `fraction` of the span on that axis, but
/// never less than `min_margin_deg`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsPadding {
    /// Fraction of the span added on each side
    pub fraction: f64,
    /// Minimum margin in degrees added on each side
    pub min_margin_deg: f64,
}

impl Default for BoundsPadding {
    fn default() -> Self {
        Self {
            fraction: 0.1,
            min_margin_deg: 0.002,
        }
    }
}

/// Minimal rectangle covering a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    /// Minimum latitude
    pub south: f64,
    /// Minimum longitude
    pub west: f64,
    /// Maximum latitude
    pub north: f64,
    /// Maximum longitude
    pub east: f64,
}

impl BoundingRegion {
    /// Compute the region covering all points, or `None` for an empty set
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = RoutePoint>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let initial = Self {
            south: first.latitude,
            west: first.longitude,
            north: first.latitude,
            east: first.longitude,
        };

        Some(points.fold(initial, |region, p| Self {
            south: region.south.min(p.latitude),
            west: region.west.min(p.longitude),
            north: region.north.max(p.latitude),
            east: region.east.max(p.longitude),
        }))
    }

    /// Expand the region by a fraction of its span, clamped to valid coordinates
    #[must_use]
    pub fn padded(&self, padding: BoundsPadding) -> Self {
        let lat_margin = (self.lat_span() * padding.fraction).max(padding.min_margin_deg);
        let lon_margin = (self.lon_span() * padding.fraction).max(padding.min_margin_deg);

        Self {
            south: (self.south - lat_margin).max(-90.0),
            west: (self.west - lon_margin).max(-180.0),
            north: (self.north + lat_margin).min(90.0),
            east: (self.east + lon_margin).min(180.0),
        }
    }

    /// Latitude extent in degrees
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude extent in degrees
    #[must_use]
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    /// Whether the point lies inside the region (edges included)
    #[must_use]
    pub fn contains(&self, point: RoutePoint) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}

/// A calculated route over all waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Flat polyline in traversal order
    pub points: Vec<RoutePoint>,
    /// Number of segments the route was assembled from
    pub segments: usize,
    /// Padded viewport region covering the polyline
    pub bounds: BoundingRegion,
}

impl Route {
    /// Concatenate segments in order; `None` if there is no geometry at all
    pub fn from_segments(segments: Vec<Vec<RoutePoint>>, padding: BoundsPadding) -> Option<Self> {
        let segment_count = segments.len();
        let points: Vec<RoutePoint> = segments.into_iter().flatten().collect();
        let bounds = BoundingRegion::from_points(points.iter().copied())?.padded(padding);

        Some(Self {
            points,
            segments: segment_count,
            bounds,
        })
    }

    /// Approximate polyline length in kilometers
    #[must_use]
    pub fn length_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| {
                let a = GeoLocation::new_unchecked(pair[0].latitude, pair[0].longitude);
                let b = GeoLocation::new_unchecked(pair[1].latitude, pair[1].longitude);
                a.distance_km(&b)
            })
            .sum()
    }
}
