//! Application state shared across handlers

use std::{fmt, sync::Arc};

use application::PlannerSession;
use infrastructure::MapConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The route-planning session served by this process
    pub planner: Arc<PlannerSession>,
    /// Map settings handed to the browser page
    pub map: Arc<MapConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("planner", &self.planner)
            .field("tile_url", &self.map.tile_url)
            .finish()
    }
}
