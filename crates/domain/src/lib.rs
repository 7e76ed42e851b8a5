//! Domain layer for MeterRoute
//!
//! Contains the route-planning vocabulary: waypoints, address suggestions,
//! route geometry and bounding regions. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
