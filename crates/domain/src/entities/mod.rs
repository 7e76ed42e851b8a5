//! Domain entities - Waypoints, address candidates and route geometry

mod address;
mod route;
mod waypoint;

pub use address::{AddressDetails, AddressSuggestion, NO_NUMBER, UNKNOWN_STREET};
pub use route::{BoundingRegion, BoundsPadding, Route, RoutePoint};
pub use waypoint::{MIN_ROUTE_WAYPOINTS, Waypoint};
