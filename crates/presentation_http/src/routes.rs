//! Route definitions

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Browser page
        .route("/", get(handlers::page::index))
        // Health
        .route("/health", get(handlers::health::health_check))
        // Map settings
        .route("/v1/config/map", get(handlers::map::map_config))
        // Planner state
        .route("/v1/planner", get(handlers::planner::snapshot))
        .route(
            "/v1/waypoints",
            post(handlers::waypoints::add_selected).delete(handlers::waypoints::clear),
        )
        .route("/v1/waypoints/click", post(handlers::waypoints::add_clicked))
        .route("/v1/waypoints/{index}", delete(handlers::waypoints::remove))
        .route("/v1/route", post(handlers::route::calculate))
        // Geocoding search
        .route("/v1/search", get(handlers::search::search))
        // Sharing
        .route("/v1/share", get(handlers::share::share))
        // Attach state
        .with_state(state)
}
