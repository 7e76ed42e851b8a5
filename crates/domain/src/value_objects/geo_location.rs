//! Latitude/longitude pair used for waypoints and routing requests

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used for route length estimates
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the map, latitude first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

/// Rejected coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Coordinates out of range: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    /// Build a location from a map click or a geocoder hit
    ///
    /// # Errors
    ///
    /// Fails unless latitude lies in [-90, 90] and longitude in [-180, 180].
    /// NaN is outside both ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        let lat_ok = (-90.0..=90.0).contains(&latitude);
        let lon_ok = (-180.0..=180.0).contains(&longitude);
        if lat_ok && lon_ok {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(InvalidCoordinates {
                latitude,
                longitude,
            })
        }
    }

    /// Wrap coordinates that are already known to be in range
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Haversine distance to `other`
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let (phi1, phi2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let half_dphi = (phi2 - phi1) / 2.0;
        let half_dlambda = (other.longitude - self.longitude).to_radians() / 2.0;

        let h = (phi1.cos() * phi2.cos())
            .mul_add(half_dlambda.sin().powi(2), half_dphi.sin().powi(2))
            .clamp(0.0, 1.0);
        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }

    /// Default map center
    #[must_use]
    pub const fn brasilia() -> Self {
        Self::new_unchecked(-15.779_72, -47.929_72)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
