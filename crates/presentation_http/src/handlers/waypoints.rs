//! Waypoint handlers
//!
//! Map clicks, selected search suggestions, removal and clearing.

use application::{ClickOutcome, PlannerSnapshot};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use domain::GeoLocation;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Coordinates of a map click
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClickRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
}

/// A waypoint chosen from the search suggestions
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddWaypointRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
    /// Display name; the coordinates are used when absent or blank
    #[serde(default)]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub address: Option<String>,
}

fn location(latitude: f64, longitude: f64) -> Result<GeoLocation, ApiError> {
    GeoLocation::new(latitude, longitude).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Append a waypoint for a map click
///
/// The address is reverse-geocoded; when that fails the waypoint is still
/// added and the response carries a `warning`.
#[instrument(skip(state, request))]
pub async fn add_clicked(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ClickRequest>,
) -> Result<(StatusCode, Json<ClickOutcome>), ApiError> {
    let location = location(request.latitude, request.longitude)?;
    let outcome = state.planner.add_clicked(location).await;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Append a waypoint for a selected search suggestion
#[instrument(skip(state, request))]
pub async fn add_selected(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AddWaypointRequest>,
) -> Result<(StatusCode, Json<PlannerSnapshot>), ApiError> {
    let location = location(request.latitude, request.longitude)?;
    let snapshot = state.planner.add_selected(location, request.address);
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// Remove one waypoint; unknown indices leave the list unchanged
pub async fn remove(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Json<PlannerSnapshot> {
    Json(state.planner.remove(index))
}

/// Remove every waypoint and the route
pub async fn clear(State(state): State<AppState>) -> Json<PlannerSnapshot> {
    Json(state.planner.clear())
}
