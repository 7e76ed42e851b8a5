//! Planner snapshot handler

use application::PlannerSnapshot;
use axum::{Json, extract::State};

use crate::state::AppState;

/// Current waypoints, route and suggestions
pub async fn snapshot(State(state): State<AppState>) -> Json<PlannerSnapshot> {
    Json(state.planner.snapshot())
}
