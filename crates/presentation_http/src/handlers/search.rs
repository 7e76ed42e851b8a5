//! Address search handler

use application::SearchOutcome;
use axum::{
    Json,
    extract::{Query, State},
};
use domain::AddressSuggestion;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::validation::describe, state::AppState};

/// Search query parameters
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchParams {
    /// Free-text query; blank clears the suggestions
    #[serde(default)]
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub q: String,
}

/// Search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// A newer search replaced this one; `suggestions` should be ignored
    pub superseded: bool,
    pub suggestions: Vec<AddressSuggestion>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Applied(suggestions) => Self {
                superseded: false,
                suggestions,
            },
            SearchOutcome::Superseded => Self {
                superseded: true,
                suggestions: Vec::new(),
            },
        }
    }
}

/// Debounced address search
///
/// Only the most recent request's results become visible; older requests
/// answer with `superseded: true`.
#[instrument(skip(state), fields(query_len = params.q.len()))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    params
        .validate()
        .map_err(|e| ApiError::BadRequest(describe(&e)))?;

    let outcome = state.planner.search(&params.q).await?;
    Ok(Json(outcome.into()))
}
