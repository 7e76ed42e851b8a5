//! Share handler

use application::ShareMessage;
use axum::{Json, extract::State};

use crate::{error::ApiError, state::AppState};

/// WhatsApp share text and link for the current waypoints
pub async fn share(State(state): State<AppState>) -> Result<Json<ShareMessage>, ApiError> {
    Ok(Json(state.planner.share()?))
}
