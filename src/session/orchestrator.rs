//! Route session orchestrator.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::broadcast;

use crate::advisory::advise;
use crate::config::defaults::DEFAULT_LOCATION_WAIT;
use crate::geo::LatLng;
use crate::markers::{Marker, MarkerKind, MarkerSet};
use crate::route::{Route, RouteRequest, RoutingApi, TransportMode};
use crate::station::{nearest, StationIndex};
use crate::tracking::{LocationError, PositionTracker, TrackerEvent};

use super::state::{EndpointSelection, SessionError, SessionStatus};
use super::view::{RouteSummary, SessionView};

/// Configuration for the route session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long to wait for a first fix when the start endpoint is the
    /// current location and none is available yet.
    pub location_wait: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            location_wait: DEFAULT_LOCATION_WAIT,
        }
    }
}

/// Internal session state.
struct SessionState {
    start: Option<EndpointSelection>,
    end: Option<EndpointSelection>,
    mode: TransportMode,
    status: SessionStatus,

    /// Current route. Only replaced wholesale by a newer successful
    /// request; failures and superseded results leave it untouched.
    route: Option<Route>,

    /// Resolved endpoints of the current route (for markers).
    endpoints: Option<(LatLng, LatLng)>,

    worst_aqi: Option<i32>,
    advisories: Vec<String>,
    error: Option<SessionError>,
}

/// Route session - orchestrates tracking, matching, routing, and advisory.
///
/// One instance drives one map view. The session is the only writer of the
/// current route and advisory context; the station index is shared
/// read-only and the tracker owns the live position.
pub struct RouteSession<R: RoutingApi> {
    /// Station registry snapshot. Must be non-empty before `analyze()` is
    /// called (nearest-station matching has no empty-index fallback).
    stations: Arc<StationIndex>,

    /// Live position tracker.
    tracker: Arc<PositionTracker>,

    /// Routing client.
    client: R,

    /// Internal state (thread-safe).
    state: Arc<RwLock<SessionState>>,

    /// Monotonically increasing request sequence number; the staleness
    /// check compares against it at resolution time (last-request-wins).
    request_seq: AtomicU64,

    /// Configuration.
    config: SessionConfig,
}

impl<R: RoutingApi> RouteSession<R> {
    /// Create a session with default configuration.
    pub fn new(stations: Arc<StationIndex>, tracker: Arc<PositionTracker>, client: R) -> Self {
        Self::with_config(stations, tracker, client, SessionConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(
        stations: Arc<StationIndex>,
        tracker: Arc<PositionTracker>,
        client: R,
        config: SessionConfig,
    ) -> Self {
        Self {
            stations,
            tracker,
            client,
            state: Arc::new(RwLock::new(SessionState {
                start: None,
                end: None,
                mode: TransportMode::Car,
                status: SessionStatus::Idle,
                route: None,
                endpoints: None,
                worst_aqi: None,
                advisories: Vec::new(),
                error: None,
            })),
            request_seq: AtomicU64::new(0),
            config,
        }
    }

    /// Select the start endpoint.
    pub fn set_start(&self, selection: EndpointSelection) {
        self.state.write().unwrap().start = Some(selection);
    }

    /// Select the end endpoint.
    pub fn set_end(&self, selection: EndpointSelection) {
        self.state.write().unwrap().end = Some(selection);
    }

    /// Select the transport mode for subsequent analyses.
    pub fn set_mode(&self, mode: TransportMode) {
        self.state.write().unwrap().mode = mode;
    }

    /// Current session status.
    pub fn status(&self) -> SessionStatus {
        self.state.read().unwrap().status
    }

    /// Analyze the route between the selected endpoints.
    ///
    /// Re-entrant: starting a new analysis while one is in flight
    /// supersedes the old one; the superseded result is discarded when it
    /// eventually resolves. Returns the session status after this attempt
    /// (which reflects a newer request if this one was superseded).
    pub async fn analyze(&self) -> SessionStatus {
        let seq = self.request_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let (start_selection, end_selection, mode) = {
            let state = self.state.read().unwrap();
            (state.start.clone(), state.end.clone(), state.mode)
        };

        let (Some(start_selection), Some(end_selection)) = (start_selection, end_selection)
        else {
            self.fail(seq, SessionError::MissingEndpoints);
            return self.status();
        };

        let start = match self.resolve(seq, &start_selection).await {
            Ok(point) => point,
            Err(error) => {
                self.fail(seq, error);
                return self.status();
            }
        };
        let end = match self.resolve(seq, &end_selection).await {
            Ok(point) => point,
            Err(error) => {
                self.fail(seq, error);
                return self.status();
            }
        };

        self.commit(seq, |state| {
            state.status = SessionStatus::Fetching;
            state.error = None;
        });
        tracing::info!(seq, mode = %mode, start = %start, end = %end, "Analyzing route");

        let request = RouteRequest { start, end, mode };
        match self.client.fetch_route(&request).await {
            Ok(route) => {
                let start_station = nearest(&self.stations, start);
                let end_station = nearest(&self.stations, end);
                let worst_aqi = start_station.aqi.max(end_station.aqi);
                let advisories = advise(worst_aqi, mode);

                tracing::info!(
                    seq,
                    start_station = %start_station.name,
                    end_station = %end_station.name,
                    worst_aqi,
                    distance_km = route.distance_km,
                    "Route analysis complete"
                );

                self.commit(seq, move |state| {
                    state.route = Some(route);
                    state.endpoints = Some((start, end));
                    state.worst_aqi = Some(worst_aqi);
                    state.advisories = advisories;
                    state.status = SessionStatus::Ready;
                    state.error = None;
                });
            }
            Err(error) => {
                self.fail(seq, SessionError::Route(error));
            }
        }

        self.status()
    }

    /// Build a read-only snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        let state = self.state.read().unwrap();

        let route = state.route.as_ref().map(|route| RouteSummary {
            distance_km: route.distance_km,
            duration_min: route.duration_min,
            steps: route.steps.clone(),
        });

        SessionView {
            status: state.status,
            route,
            worst_aqi: state.worst_aqi,
            advisories: state.advisories.clone(),
            error: state.error.as_ref().map(|e| e.to_string()),
            markers: self.build_markers(&state),
        }
    }

    /// Resolve an endpoint selection to concrete coordinates.
    async fn resolve(
        &self,
        seq: u64,
        selection: &EndpointSelection,
    ) -> Result<LatLng, SessionError> {
        match selection {
            EndpointSelection::Point(point) => Ok(*point),

            EndpointSelection::District(name) => self
                .stations
                .lookup(name)
                .map(|station| station.lat_lng())
                .ok_or_else(|| SessionError::UnknownDistrict(name.clone())),

            EndpointSelection::CurrentLocation => {
                if let Some(position) = self.tracker.current_position() {
                    return Ok(position.lat_lng());
                }

                self.commit(seq, |state| {
                    state.status = SessionStatus::AwaitingLocation;
                    state.error = None;
                });
                tracing::info!(seq, "Waiting for a location fix");

                let mut events = self.tracker.subscribe();
                let wait = tokio::time::timeout(self.config.location_wait, async move {
                    loop {
                        match events.recv().await {
                            Ok(TrackerEvent::Fix(fix)) => return Ok(fix.position.lat_lng()),
                            Ok(TrackerEvent::Failed(error)) => {
                                return Err(SessionError::Location(error))
                            }
                            Err(broadcast::error::RecvError::Lagged(_)) => continue,
                            Err(broadcast::error::RecvError::Closed) => {
                                return Err(SessionError::Location(LocationError::Unavailable(
                                    "tracker event stream closed".to_string(),
                                )))
                            }
                        }
                    }
                })
                .await;

                match wait {
                    Ok(result) => result,
                    Err(_) => Err(SessionError::Location(LocationError::Timeout(format!(
                        "no location fix within {}s",
                        self.config.location_wait.as_secs()
                    )))),
                }
            }
        }
    }

    /// Record a failure for this request, unless superseded.
    ///
    /// The current route is deliberately left untouched: a failure never
    /// partially overwrites an existing route.
    fn fail(&self, seq: u64, error: SessionError) {
        tracing::warn!(seq, error = %error, "Route analysis failed");
        self.commit(seq, move |state| {
            state.status = SessionStatus::Failed;
            state.error = Some(error);
        });
    }

    /// Apply a state change only if `seq` is still the most recent request.
    ///
    /// The sequence check runs under the state lock, so a stale request can
    /// never interleave its write with a newer request's.
    fn commit<F: FnOnce(&mut SessionState)>(&self, seq: u64, apply: F) -> bool {
        let mut state = self.state.write().unwrap();
        if self.request_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "Discarding result of superseded request");
            return false;
        }
        apply(&mut state);
        true
    }

    /// Current marker snapshot: stations, live position, route endpoints.
    fn build_markers(&self, state: &SessionState) -> MarkerSet {
        let mut markers: Vec<Marker> = self
            .stations
            .iter()
            .map(|station| {
                Marker::new(
                    format!("station:{}", station.name),
                    station.lat_lng(),
                    MarkerKind::Station,
                    station.name.clone(),
                )
            })
            .collect();

        if let Some(position) = self.tracker.current_position() {
            markers.push(Marker::new(
                "current-position",
                position.lat_lng(),
                MarkerKind::CurrentPosition,
                "Current position",
            ));
        }

        if let Some((start, end)) = state.endpoints {
            markers.push(Marker::new(
                "route:start",
                start,
                MarkerKind::RouteEndpoint,
                "Start",
            ));
            markers.push(Marker::new(
                "route:end",
                end,
                MarkerKind::RouteEndpoint,
                "End",
            ));
        }

        MarkerSet::new(markers)
    }
}
