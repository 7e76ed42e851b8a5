//! Geocoding integration for MeterRoute
//!
//! Provides free-text address search and reverse geocoding via
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern used by the other integration
//! crates. [`GeocodingClient`] defines the interface, implemented by
//! [`NominatimGeocodingClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{GeocodingClient, NominatimConfig, NominatimGeocodingClient};
//!
//! let client = NominatimGeocodingClient::new(&NominatimConfig::default())?;
//!
//! let suggestions = client.search("Esplanada dos Ministérios").await?;
//! let details = client.reverse_geocode(-15.7997, -47.8645).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GeocodingClient, NominatimGeocodingClient};
pub use config::NominatimConfig;
pub use error::GeocodingError;
