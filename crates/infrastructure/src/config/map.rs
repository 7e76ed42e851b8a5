//! Map page configuration: initial viewport and tile layer.

use serde::{Deserialize, Serialize};

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_geo_location(&self) -> Option<domain::GeoLocation> {
        domain::GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

/// Map rendering configuration served to the browser page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial map center (default: Brasília)
    #[serde(default = "default_center")]
    pub center: GeoLocationConfig,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Tile URL template with `{z}`, `{x}`, `{y}` placeholders
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Attribution shown in the map corner
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Maximum zoom level offered by the tile server
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

fn default_center() -> GeoLocationConfig {
    let brasilia = domain::GeoLocation::brasilia();
    GeoLocationConfig {
        latitude: brasilia.latitude(),
        longitude: brasilia.longitude(),
    }
}

const fn default_zoom() -> u8 {
    4
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_attribution() -> String {
    "&copy; OpenStreetMap contributors".to_string()
}

const fn default_max_zoom() -> u8 {
    19
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            max_zoom: default_max_zoom(),
        }
    }
}

impl MapConfig {
    /// Validate the map configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.center.to_geo_location().is_none() {
            return Err(format!(
                "map.center has invalid coordinates: {}, {}",
                self.center.latitude, self.center.longitude
            ));
        }
        if self.zoom > self.max_zoom {
            return Err(format!(
                "map.zoom ({}) exceeds map.max_zoom ({})",
                self.zoom, self.max_zoom
            ));
        }
        if !["{z}", "{x}", "{y}"].iter().all(|p| self.tile_url.contains(p)) {
            return Err("map.tile_url must contain {z}, {x} and {y} placeholders".to_string());
        }
        Ok(())
    }
}
