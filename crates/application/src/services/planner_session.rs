//! Planner session
//!
//! Single owner of the route-planning state: the waypoint store, the
//! current route and the visible address suggestions. All user intents go
//! through this type. The state lock is never held across an `.await`;
//! long-running work (reverse geocoding, routing) runs unlocked and commits
//! its result afterwards.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{AddressSuggestion, BoundsPadding, GeoLocation, MIN_ROUTE_WAYPOINTS, Route, Waypoint};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::address_search::{AddressSearch, DEFAULT_SEARCH_DEBOUNCE, SearchOutcome};
use super::point_store::PointStore;
use super::route_service::RouteService;
use super::share_service::{ShareMessage, ShareService};
use super::waypoint_resolver::WaypointResolver;
use crate::error::ApplicationError;
use crate::ports::{GeocodingPort, RoutingPort};

/// Tunables of a planner session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerSettings {
    /// Wait before a search keystroke turns into a request
    pub search_debounce: Duration,
    /// Viewport padding around a calculated route
    pub padding: BoundsPadding,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            padding: BoundsPadding::default(),
        }
    }
}

/// A waypoint as presented to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointView {
    /// Position in traversal order (0-based)
    pub index: usize,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Display address
    pub address: String,
    /// Neither the first nor the last stop
    pub is_checkpoint: bool,
}

/// Read-only view of the whole session state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerSnapshot {
    /// Waypoints in traversal order
    pub waypoints: Vec<WaypointView>,
    /// Route computed from exactly these waypoints, if any
    pub route: Option<Route>,
    /// Visible address suggestions
    pub suggestions: Vec<AddressSuggestion>,
    /// Whether enough waypoints exist to request a route
    pub can_calculate_route: bool,
    /// Waypoint store revision this snapshot was taken at
    pub revision: u64,
}

/// Result of adding a waypoint by clicking the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickOutcome {
    /// Index of the appended waypoint
    pub index: usize,
    /// Non-fatal warning when the address could not be resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// State after the waypoint was appended
    pub snapshot: PlannerSnapshot,
}

#[derive(Debug, Default)]
struct PlannerState {
    points: PointStore,
    route: Option<Route>,
}

impl PlannerState {
    fn invalidate_route(&mut self) {
        if self.route.take().is_some() {
            debug!("Route invalidated by waypoint change");
        }
    }
}

/// Route-planning session state and use cases
pub struct PlannerSession {
    state: Mutex<PlannerState>,
    routes: RouteService,
    resolver: WaypointResolver,
    search: AddressSearch,
    share: ShareService,
}

impl fmt::Debug for PlannerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PlannerSession")
            .field("waypoints", &state.points.len())
            .field("has_route", &state.route.is_some())
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl PlannerSession {
    /// Create an empty session
    #[must_use]
    pub fn new(
        geocoding: Arc<dyn GeocodingPort>,
        routing: Arc<dyn RoutingPort>,
        settings: PlannerSettings,
    ) -> Self {
        Self {
            state: Mutex::new(PlannerState::default()),
            routes: RouteService::new(routing).with_padding(settings.padding),
            resolver: WaypointResolver::new(Arc::clone(&geocoding)),
            search: AddressSearch::new(geocoding).with_debounce(settings.search_debounce),
            share: ShareService::new(),
        }
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> PlannerSnapshot {
        let state = self.state.lock();
        self.snapshot_of(&state)
    }

    /// Add a waypoint for a map click
    ///
    /// The address is reverse-geocoded before the waypoint is appended; a
    /// failed lookup still appends a waypoint with a numbered label.
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    pub async fn add_clicked(&self, location: GeoLocation) -> ClickOutcome {
        let resolution = self.resolver.resolve(location).await;

        let mut state = self.state.lock();
        let sequence_number = state.points.next_sequence_number();
        let (waypoint, warning) = resolution.into_waypoint(location, sequence_number);
        let index = state.points.push(waypoint);
        state.invalidate_route();
        info!(index, "Waypoint added from map click");

        ClickOutcome {
            index,
            warning,
            snapshot: self.snapshot_of(&state),
        }
    }

    /// Add a waypoint chosen from the search suggestions
    ///
    /// Clears the visible suggestions. Without an address the waypoint is
    /// labelled with its coordinates.
    #[instrument(skip(self, address), fields(lat = location.latitude(), lon = location.longitude()))]
    pub fn add_selected(&self, location: GeoLocation, address: Option<String>) -> PlannerSnapshot {
        let mut state = self.state.lock();
        let index = state.points.add_waypoint(location, address);
        state.invalidate_route();
        self.search.clear();
        info!(index, "Waypoint added from search");

        self.snapshot_of(&state)
    }

    /// Remove the waypoint at `index`; out-of-range indices are ignored
    pub fn remove(&self, index: usize) -> PlannerSnapshot {
        let mut state = self.state.lock();
        if state.points.remove_waypoint(index).is_some() {
            state.invalidate_route();
            info!(index, "Waypoint removed");
        } else {
            debug!(index, "Ignoring removal of unknown waypoint");
        }
        self.snapshot_of(&state)
    }

    /// Remove every waypoint and the route
    pub fn clear(&self) -> PlannerSnapshot {
        let mut state = self.state.lock();
        state.points.clear();
        state.invalidate_route();
        info!("Waypoints cleared");
        self.snapshot_of(&state)
    }

    /// Calculate the route over the current waypoints
    ///
    /// On failure the previous route and the waypoints are left untouched.
    /// If the waypoints change while the calculation is running, the result
    /// is discarded and [`ApplicationError::StaleRoute`] is returned.
    #[instrument(skip(self))]
    pub async fn calculate_route(&self) -> Result<PlannerSnapshot, ApplicationError> {
        let (waypoints, revision) = {
            let state = self.state.lock();
            (state.points.list().to_vec(), state.points.revision())
        };

        let route = self.routes.calculate_route(&waypoints).await?;

        let mut state = self.state.lock();
        if state.points.revision() != revision {
            warn!(
                started_at = revision,
                current = state.points.revision(),
                "Discarding route for outdated waypoints"
            );
            return Err(ApplicationError::StaleRoute);
        }
        state.route = Some(route);

        Ok(self.snapshot_of(&state))
    }

    /// Run a debounced address search
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, ApplicationError> {
        self.search.search(query).await
    }

    /// Compose the share message for the current waypoints
    pub fn share(&self) -> Result<ShareMessage, ApplicationError> {
        let state = self.state.lock();
        self.share.compose(state.points.list())
    }

    fn snapshot_of(&self, state: &PlannerState) -> PlannerSnapshot {
        let waypoints = state.points.list();
        let total = waypoints.len();

        PlannerSnapshot {
            waypoints: waypoints
                .iter()
                .enumerate()
                .map(|(index, waypoint)| view(index, total, waypoint))
                .collect(),
            route: state.route.clone(),
            suggestions: self.search.suggestions(),
            can_calculate_route: total >= MIN_ROUTE_WAYPOINTS,
            revision: state.points.revision(),
        }
    }
}

fn view(index: usize, total: usize, waypoint: &Waypoint) -> WaypointView {
    WaypointView {
        index,
        latitude: waypoint.latitude(),
        longitude: waypoint.longitude(),
        address: waypoint.address().to_string(),
        is_checkpoint: Waypoint::is_checkpoint(index, total),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use domain::{AddressDetails, DomainError, RoutePoint};
    use tokio::sync::Notify;

    use super::*;
    use crate::ports::{MockGeocodingPort, MockRoutingPort};

    fn loc(lat: f64, lon: f64) -> GeoLocation {
        GeoLocation::new(lat, lon).unwrap()
    }

    fn quiet_geocoding() -> MockGeocodingPort {
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_reverse_geocode().returning(|_| {
            Ok(AddressDetails {
                road: Some("Rua A".to_string()),
                house_number: Some("1".to_string()),
                ..Default::default()
            })
        });
        geocoding
    }

    fn straight_routing() -> MockRoutingPort {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_route_segment()
            .returning(|start, end| Ok(vec![start.into(), end.into()]));
        routing
    }

    fn session(geocoding: MockGeocodingPort, routing: MockRoutingPort) -> PlannerSession {
        PlannerSession::new(
            Arc::new(geocoding),
            Arc::new(routing),
            PlannerSettings {
                search_debounce: Duration::ZERO,
                ..PlannerSettings::default()
            },
        )
    }

    #[test]
    fn empty_snapshot() {
        let session = session(MockGeocodingPort::new(), MockRoutingPort::new());
        let snapshot = session.snapshot();

        assert!(snapshot.waypoints.is_empty());
        assert!(snapshot.route.is_none());
        assert!(!snapshot.can_calculate_route);
    }

    #[tokio::test]
    async fn click_appends_resolved_waypoint() {
        let session = session(quiet_geocoding(), MockRoutingPort::new());

        let outcome = session.add_clicked(loc(-15.78, -47.93)).await;

        assert_eq!(outcome.index, 0);
        assert!(outcome.warning.is_none());
        assert_eq!(outcome.snapshot.waypoints[0].address, "Rua A, 1");
    }

    #[tokio::test]
    async fn failed_click_lookup_uses_sequence_label() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding
            .expect_reverse_geocode()
            .returning(|_| Err(ApplicationError::ExternalService("offline".to_string())));
        let session = session(geocoding, MockRoutingPort::new());
        session.add_selected(loc(1.0, 1.0), Some("A".to_string()));

        let outcome = session.add_clicked(loc(2.0, 2.0)).await;

        assert_eq!(outcome.index, 1);
        assert_eq!(outcome.snapshot.waypoints[1].address, "Point 2");
        assert!(outcome.warning.is_some());
    }

    #[test]
    fn checkpoints_and_route_flag_follow_waypoint_count() {
        let session = session(MockGeocodingPort::new(), MockRoutingPort::new());
        session.add_selected(loc(1.0, 1.0), None);
        assert!(!session.snapshot().can_calculate_route);

        session.add_selected(loc(2.0, 2.0), None);
        let snapshot = session.add_selected(loc(3.0, 3.0), None);

        assert!(snapshot.can_calculate_route);
        let flags: Vec<_> = snapshot.waypoints.iter().map(|w| w.is_checkpoint).collect();
        assert_eq!(flags, [false, true, false]);
    }

    #[tokio::test]
    async fn calculate_then_mutate_clears_route() {
        let session = session(MockGeocodingPort::new(), straight_routing());
        session.add_selected(loc(1.0, 1.0), None);
        session.add_selected(loc(2.0, 2.0), None);

        let snapshot = session.calculate_route().await.unwrap();
        let route = snapshot.route.unwrap();
        assert_eq!(route.segments, 1);
        assert_eq!(route.points, vec![RoutePoint::new(1.0, 1.0), RoutePoint::new(2.0, 2.0)]);

        let after_add = session.add_selected(loc(3.0, 3.0), None);
        assert!(after_add.route.is_none());

        session.calculate_route().await.unwrap();
        assert!(session.remove(0).route.is_none());

        session.calculate_route().await.unwrap();
        let cleared = session.clear();
        assert!(cleared.route.is_none());
        assert!(cleared.waypoints.is_empty());
    }

    #[tokio::test]
    async fn remove_out_of_range_keeps_route() {
        let session = session(MockGeocodingPort::new(), straight_routing());
        session.add_selected(loc(1.0, 1.0), None);
        session.add_selected(loc(2.0, 2.0), None);
        session.calculate_route().await.unwrap();

        let snapshot = session.remove(9);

        assert_eq!(snapshot.waypoints.len(), 2);
        assert!(snapshot.route.is_some());
    }

    #[tokio::test]
    async fn calculate_with_one_waypoint_fails_without_call() {
        let mut routing = MockRoutingPort::new();
        routing.expect_route_segment().never();
        let session = session(MockGeocodingPort::new(), routing);
        session.add_selected(loc(1.0, 1.0), None);

        let result = session.calculate_route().await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::InsufficientWaypoints { .. }))
        ));
    }

    #[tokio::test]
    async fn failed_calculation_keeps_previous_route() {
        let mut routing = MockRoutingPort::new();
        let mut calls = 0;
        routing.expect_route_segment().returning(move |start, end| {
            calls += 1;
            if calls == 1 {
                Ok(vec![start.into(), end.into()])
            } else {
                Err(ApplicationError::ExternalService("HTTP 500".to_string()))
            }
        });
        let session = session(MockGeocodingPort::new(), routing);
        session.add_selected(loc(1.0, 1.0), None);
        session.add_selected(loc(2.0, 2.0), None);
        let first = session.calculate_route().await.unwrap();

        let result = session.calculate_route().await;

        assert!(matches!(result, Err(ApplicationError::RouteSegment { segment: 1, .. })));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.route, first.route);
        assert_eq!(snapshot.waypoints.len(), 2);
    }

    /// Holds every segment request until the gate is opened
    struct GatedRouting {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl RoutingPort for GatedRouting {
        async fn route_segment(
            &self,
            start: GeoLocation,
            end: GeoLocation,
        ) -> Result<Vec<RoutePoint>, ApplicationError> {
            self.gate.notified().await;
            Ok(vec![start.into(), end.into()])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn route_for_changed_waypoints_is_discarded() {
        let gate = Arc::new(Notify::new());
        let session = Arc::new(PlannerSession::new(
            Arc::new(MockGeocodingPort::new()),
            Arc::new(GatedRouting {
                gate: Arc::clone(&gate),
            }),
            PlannerSettings::default(),
        ));
        session.add_selected(loc(1.0, 1.0), None);
        session.add_selected(loc(2.0, 2.0), None);

        let pending = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.calculate_route().await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        session.add_selected(loc(3.0, 3.0), None);
        gate.notify_one();

        let result = pending.await.unwrap();

        assert!(matches!(result, Err(ApplicationError::StaleRoute)));
        let snapshot = session.snapshot();
        assert!(snapshot.route.is_none());
        assert_eq!(snapshot.waypoints.len(), 3);
    }

    #[tokio::test]
    async fn selecting_a_suggestion_clears_suggestions() {
        let mut geocoding = MockGeocodingPort::new();
        geocoding.expect_search_addresses().returning(|q| {
            Ok(vec![AddressSuggestion {
                display_name: format!("{q}, Brasília"),
                latitude: -15.8,
                longitude: -47.9,
                importance: 0.7,
            }])
        });
        let session = session(geocoding, MockRoutingPort::new());

        let outcome = session.search("Eixo").await.unwrap();
        let SearchOutcome::Applied(found) = outcome else {
            unreachable!("search was not superseded");
        };
        assert_eq!(session.snapshot().suggestions.len(), 1);

        let location = GeoLocation::new(found[0].latitude, found[0].longitude).unwrap();
        let snapshot = session.add_selected(location, Some(found[0].display_name.clone()));

        assert!(snapshot.suggestions.is_empty());
        assert_eq!(snapshot.waypoints[0].address, "Eixo, Brasília");
    }

    #[test]
    fn share_requires_two_waypoints() {
        let session = session(MockGeocodingPort::new(), MockRoutingPort::new());
        session.add_selected(loc(1.0, 1.0), Some("A".to_string()));
        assert!(session.share().is_err());

        session.add_selected(loc(2.0, 2.0), Some("B".to_string()));
        let message = session.share().unwrap();
        assert!(message.text.contains("1. A"));
        assert!(message.text.contains("2. B"));
    }
}
