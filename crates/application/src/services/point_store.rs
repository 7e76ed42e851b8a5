//! Ordered waypoint storage
//!
//! Insertion order is traversal order. Every effective mutation bumps the
//! revision so that in-flight route calculations can detect that the
//! waypoints they were started from are gone.

use domain::{GeoLocation, Waypoint};

/// Ordered, deduplication-free list of waypoints
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    waypoints: Vec<Waypoint>,
    revision: u64,
}

impl PointStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a waypoint at `location`
    ///
    /// Without an address the waypoint is labelled with its coordinates.
    /// Returns the index of the new waypoint.
    pub fn add_waypoint(&mut self, location: GeoLocation, address: Option<String>) -> usize {
        let waypoint = match address {
            Some(address) if !address.trim().is_empty() => Waypoint::new(location, address),
            _ => Waypoint::with_placeholder(location),
        };
        self.push(waypoint)
    }

    /// Append an already built waypoint, returning its index
    pub fn push(&mut self, waypoint: Waypoint) -> usize {
        self.waypoints.push(waypoint);
        self.revision += 1;
        self.waypoints.len() - 1
    }

    /// Remove the waypoint at `index`
    ///
    /// Out-of-range indices are ignored and leave the revision untouched.
    pub fn remove_waypoint(&mut self, index: usize) -> Option<Waypoint> {
        if index >= self.waypoints.len() {
            return None;
        }
        self.revision += 1;
        Some(self.waypoints.remove(index))
    }

    /// Remove every waypoint
    pub fn clear(&mut self) {
        if !self.waypoints.is_empty() {
            self.waypoints.clear();
            self.revision += 1;
        }
    }

    /// Waypoints in traversal order
    #[must_use]
    pub fn list(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of stored waypoints
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// 1-based number the next appended waypoint will carry
    #[must_use]
    pub fn next_sequence_number(&self) -> usize {
        self.waypoints.len() + 1
    }

    /// Counter bumped by every effective mutation
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(lat: f64, lon: f64) -> GeoLocation {
        GeoLocation::new(lat, lon).unwrap()
    }

    #[test]
    fn add_without_address_uses_placeholder() {
        let mut store = PointStore::new();
        let index = store.add_waypoint(loc(-15.78, -47.93), None);

        assert_eq!(index, 0);
        assert_eq!(store.list()[0].address(), "Point -15.7800, -47.9300");
    }

    #[test]
    fn blank_address_uses_placeholder() {
        let mut store = PointStore::new();
        store.add_waypoint(loc(1.0, 2.0), Some("   ".to_string()));
        assert_eq!(store.list()[0].address(), "Point 1.0000, 2.0000");
    }

    #[test]
    fn add_keeps_insertion_order_and_duplicates() {
        let mut store = PointStore::new();
        store.add_waypoint(loc(1.0, 1.0), Some("A".to_string()));
        store.add_waypoint(loc(2.0, 2.0), Some("B".to_string()));
        store.add_waypoint(loc(1.0, 1.0), Some("A".to_string()));

        let labels: Vec<_> = store.list().iter().map(Waypoint::address).collect();
        assert_eq!(labels, ["A", "B", "A"]);
        assert_eq!(store.next_sequence_number(), 4);
    }

    #[test]
    fn remove_in_range() {
        let mut store = PointStore::new();
        store.add_waypoint(loc(1.0, 1.0), Some("A".to_string()));
        store.add_waypoint(loc(2.0, 2.0), Some("B".to_string()));
        store.add_waypoint(loc(3.0, 3.0), Some("C".to_string()));

        let removed = store.remove_waypoint(1);

        assert_eq!(removed.map(|w| w.address().to_string()), Some("B".to_string()));
        let labels: Vec<_> = store.list().iter().map(Waypoint::address).collect();
        assert_eq!(labels, ["A", "C"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut store = PointStore::new();
        store.add_waypoint(loc(1.0, 1.0), None);
        let revision = store.revision();

        assert!(store.remove_waypoint(5).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn clear_empties_and_bumps_revision() {
        let mut store = PointStore::new();
        store.add_waypoint(loc(1.0, 1.0), None);
        let revision = store.revision();

        store.clear();

        assert!(store.is_empty());
        assert!(store.revision() > revision);
    }

    #[test]
    fn clear_on_empty_store_keeps_revision() {
        let mut store = PointStore::new();
        store.clear();
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut store = PointStore::new();
        store.add_waypoint(loc(1.0, 1.0), None);
        store.add_waypoint(loc(2.0, 2.0), None);
        assert_eq!(store.revision(), 2);
        store.remove_waypoint(0);
        assert_eq!(store.revision(), 3);
    }
}
