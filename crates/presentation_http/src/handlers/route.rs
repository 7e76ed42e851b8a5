//! Route calculation handler

use application::PlannerSnapshot;
use axum::{Json, extract::State};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Calculate the route over the current waypoints
///
/// Fails with 400 for fewer than two waypoints, 502 when a segment request
/// fails and 409 when the waypoints changed during the calculation.
#[instrument(skip(state))]
pub async fn calculate(State(state): State<AppState>) -> Result<Json<PlannerSnapshot>, ApiError> {
    let snapshot = state.planner.calculate_route().await?;
    Ok(Json(snapshot))
}
