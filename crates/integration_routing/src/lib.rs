//! Routing integration for MeterRoute
//!
//! Fetches driving directions between two coordinates from the
//! [OpenRouteService](https://openrouteservice.org) directions API and
//! decodes the GeoJSON geometry into latitude-first [`domain::RoutePoint`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_routing::{OpenRouteServiceClient, OrsConfig, RoutingClient};
//!
//! let config = OrsConfig::with_api_key("...");
//! let client = OpenRouteServiceClient::new(&config)?;
//!
//! let path = client.directions(start, end).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{OpenRouteServiceClient, RoutingClient};
pub use config::OrsConfig;
pub use error::RoutingError;
