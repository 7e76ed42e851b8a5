//! MeterRoute HTTP presentation layer
//!
//! JSON API over the planner session plus the Leaflet page that renders
//! the map, the waypoint list and the calculated route.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
