//! Map settings for the browser page

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Map settings response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfigResponse {
    /// Initial center latitude
    pub center_latitude: f64,
    /// Initial center longitude
    pub center_longitude: f64,
    pub zoom: u8,
    pub max_zoom: u8,
    /// Leaflet tile URL template
    pub tile_url: String,
    pub attribution: String,
}

/// Initial viewport and tile layer
pub async fn map_config(State(state): State<AppState>) -> Json<MapConfigResponse> {
    let map = &state.map;
    Json(MapConfigResponse {
        center_latitude: map.center.latitude,
        center_longitude: map.center.longitude,
        zoom: map.zoom,
        max_zoom: map.max_zoom,
        tile_url: map.tile_url.clone(),
        attribution: map.attribution.clone(),
    })
}
