//! Geocoding service port
//!
//! Defines the interface for free-text address search and reverse
//! geocoding of map clicks.

use async_trait::async_trait;
use domain::{AddressDetails, AddressSuggestion, GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for geocoding services
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search address candidates for a free-text query
    ///
    /// Candidates are returned in the provider's relevance order. A blank
    /// query yields an empty list without contacting the provider.
    async fn search_addresses(
        &self,
        query: &str,
    ) -> Result<Vec<AddressSuggestion>, ApplicationError>;

    /// Resolve a coordinate into an address breakdown
    async fn reverse_geocode(
        &self,
        location: GeoLocation,
    ) -> Result<AddressDetails, ApplicationError>;
}
