//! Application services - Use case implementations

mod address_search;
mod planner_session;
mod point_store;
mod route_service;
mod share_service;
mod waypoint_resolver;

pub use address_search::{AddressSearch, DEFAULT_SEARCH_DEBOUNCE, SearchOutcome};
pub use planner_session::{
    ClickOutcome, PlannerSession, PlannerSettings, PlannerSnapshot, WaypointView,
};
pub use point_store::PointStore;
pub use route_service::RouteService;
pub use share_service::{ShareMessage, ShareService};
pub use waypoint_resolver::{AddressResolution, WaypointResolver};
