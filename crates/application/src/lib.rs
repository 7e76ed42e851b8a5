//! Application layer - Use cases and orchestration
//!
//! Contains the route-planning use cases and the port definitions the
//! infrastructure adapters implement. Orchestrates domain objects without
//! performing any I/O of its own.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
