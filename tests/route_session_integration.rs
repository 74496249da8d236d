//! Integration tests for the complete clean-route pipeline.
//!
//! These tests verify the end-to-end data flows:
//! - Location source → PositionTracker → nearest-station AQI context
//! - Endpoint selection → RouteSession → routing client → advisory merge
//! - Provider JSON → route normalization (lng/lat flip, unit conversion)
//! - Staleness: a superseded route fetch never corrupts newer results
//!
//! Run with: `cargo test --test route_session_integration`

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;

use cleanroute::geo::LatLng;
use cleanroute::markers::MarkerKind;
use cleanroute::route::{
    normalize_response, Route, RouteError, RouteRequest, RoutingApi, TransportMode,
};
use cleanroute::session::{EndpointSelection, RouteSession, SessionStatus};
use cleanroute::station::{nearest, StationIndex, StationRecord};
use cleanroute::tracking::{
    LocationError, LocationSource, PositionTracker, TrackingState, WatchOptions, WatchUpdate,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Location source whose update stream is driven by the test.
struct ScriptedSource {
    senders: Mutex<Vec<mpsc::Sender<WatchUpdate>>>,
}

impl ScriptedSource {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            senders: Mutex::new(Vec::new()),
        })
    }

    async fn send_fix(&self, latitude: f64, longitude: f64) {
        let sender = self.senders.lock().unwrap().last().unwrap().clone();
        sender
            .send(WatchUpdate::Fix {
                latitude,
                longitude,
                captured_at: Utc::now(),
            })
            .await
            .unwrap();
    }
}

impl LocationSource for ScriptedSource {
    fn watch(&self, _options: WatchOptions) -> Result<mpsc::Receiver<WatchUpdate>, LocationError> {
        let (tx, rx) = mpsc::channel(16);
        self.senders.lock().unwrap().push(tx);
        Ok(rx)
    }
}

/// Routing client returning scripted results, each after a delay.
struct ScriptedRouting {
    results: Mutex<VecDeque<(Duration, Result<Route, RouteError>)>>,
}

impl ScriptedRouting {
    fn new(results: Vec<(Duration, Result<Route, RouteError>)>) -> Self {
        Self {
            results: Mutex::new(results.into_iter().collect()),
        }
    }
}

impl RoutingApi for ScriptedRouting {
    async fn fetch_route(&self, _request: &RouteRequest) -> Result<Route, RouteError> {
        let (delay, result) = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected route fetch");
        tokio::time::sleep(delay).await;
        result
    }
}

fn record(district: &str, lat: f64, lng: f64, aqi: i32) -> StationRecord {
    StationRecord {
        district: district.to_string(),
        latitude: lat,
        longitude: lng,
        aqi,
        pollution_level: "Moderate".to_string(),
        color: "#ffff00".to_string(),
    }
}

/// A small Hanoi station snapshot.
fn hanoi_stations() -> Arc<StationIndex> {
    Arc::new(
        StationIndex::from_records(vec![
            record("Ba Dinh", 21.0352, 105.8200, 80),
            record("Hoan Kiem", 21.0285, 105.8542, 160),
            record("Cau Giay", 21.0313, 105.8010, 45),
            record("Ha Dong", 20.9710, 105.7790, 110),
        ])
        .unwrap(),
    )
}

fn route(distance_km: f64) -> Route {
    Route {
        points: vec![LatLng::new(21.03, 105.80), LatLng::new(21.03, 105.85)],
        distance_km,
        duration_min: 25.0,
        steps: vec!["Head east".to_string(), "Arrive".to_string()],
    }
}

// ============================================================================
// Provider response normalization
// ============================================================================

#[test]
fn normalization_flips_provider_lng_lat_pairs() {
    let document = serde_json::from_str(
        r#"{
            "features": [{
                "geometry": { "coordinates": [[105.80, 21.02], [105.81, 21.03]] },
                "properties": { "summary": { "distance": 3000.0, "duration": 720.0 } }
            }]
        }"#,
    )
    .unwrap();

    let route = normalize_response(document).unwrap();
    assert_eq!(
        route.points,
        vec![LatLng::new(21.02, 105.80), LatLng::new(21.03, 105.81)]
    );
    assert!((route.distance_km - 3.0).abs() < 1e-9);
    assert!((route.duration_min - 12.0).abs() < 1e-9);
}

// ============================================================================
// Tracker → AQI context
// ============================================================================

#[tokio::test]
async fn tracker_fix_resolves_nearest_station_context() {
    let source = ScriptedSource::new();
    let tracker = PositionTracker::new(Arc::clone(&source) as Arc<dyn LocationSource>);
    let stations = hanoi_stations();
    let mut events = tracker.subscribe();

    tracker.start();
    // A fix next to the Cau Giay station
    source.send_fix(21.0310, 105.8020).await;

    let event = events.recv().await.unwrap();
    let fix = match event {
        cleanroute::tracking::TrackerEvent::Fix(fix) => fix,
        other => panic!("expected fix, got {other:?}"),
    };
    assert!(fix.in_service_area);

    // Consumers re-derive AQI context from the fix on every event
    let station = nearest(&stations, fix.position.lat_lng());
    assert_eq!(station.name, "Cau Giay");
    assert_eq!(station.aqi, 45);
}

#[tokio::test]
async fn tracker_stop_discards_position_before_returning() {
    let source = ScriptedSource::new();
    let tracker = PositionTracker::new(Arc::clone(&source) as Arc<dyn LocationSource>);
    let mut events = tracker.subscribe();

    tracker.start();
    source.send_fix(21.0285, 105.8542).await;
    events.recv().await.unwrap();
    assert!(tracker.current_position().is_some());

    tracker.stop();
    assert_eq!(tracker.state(), TrackingState::Idle);
    assert!(tracker.current_position().is_none());

    // A late fix from the cancelled subscription is dropped silently
    let _ = source.send_fix(21.0400, 105.8600).await;
    tokio::task::yield_now().await;
    assert!(tracker.current_position().is_none());
    assert!(events.try_recv().is_err());
}

// ============================================================================
// End-to-end session flows
// ============================================================================

#[tokio::test]
async fn current_location_route_produces_ready_view_with_advisories() {
    let source = ScriptedSource::new();
    let tracker = Arc::new(PositionTracker::new(
        Arc::clone(&source) as Arc<dyn LocationSource>
    ));
    tracker.start();

    let session = Arc::new(RouteSession::new(
        hanoi_stations(),
        Arc::clone(&tracker),
        ScriptedRouting::new(vec![(Duration::ZERO, Ok(route(5.5)))]),
    ));
    session.set_start(EndpointSelection::CurrentLocation);
    session.set_end(EndpointSelection::District("Hoan Kiem".to_string()));
    session.set_mode(TransportMode::Bike);

    let analysis = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.analyze().await })
    };

    // No fix yet, so the session waits on the tracker
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(session.status(), SessionStatus::AwaitingLocation);

    // First fix arrives near Cau Giay (AQI 45); destination is Hoan Kiem
    // (AQI 160), so the worst AQI drives a severe advisory
    source.send_fix(21.0310, 105.8020).await;
    assert_eq!(analysis.await.unwrap(), SessionStatus::Ready);

    let view = session.view();
    assert_eq!(view.worst_aqi, Some(160));
    assert_eq!(view.route.as_ref().unwrap().distance_km, 5.5);
    assert!(view.advisories[0].contains("Severe pollution"));
    assert!(view.advisories[1].contains("certified filtering mask"));

    // The marker snapshot carries stations, the live fix, and both endpoints
    let markers = view.markers;
    assert!(markers
        .markers()
        .iter()
        .any(|m| m.kind == MarkerKind::CurrentPosition));
    assert!(markers.markers().iter().any(|m| m.id == "route:start"));
    assert_eq!(
        markers
            .markers()
            .iter()
            .filter(|m| m.kind == MarkerKind::Station)
            .count(),
        4
    );
}

#[tokio::test]
async fn superseded_fetch_never_overwrites_newer_result() {
    let source = ScriptedSource::new();
    let tracker = Arc::new(PositionTracker::new(
        Arc::clone(&source) as Arc<dyn LocationSource>
    ));

    let session = Arc::new(RouteSession::new(
        hanoi_stations(),
        tracker,
        ScriptedRouting::new(vec![
            (Duration::from_millis(80), Ok(route(1.0))),
            (Duration::ZERO, Ok(route(2.0))),
        ]),
    ));
    session.set_start(EndpointSelection::District("Ba Dinh".to_string()));
    session.set_end(EndpointSelection::District("Ha Dong".to_string()));

    let stale = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.analyze().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Supersede the in-flight request; this one resolves first
    assert_eq!(session.analyze().await, SessionStatus::Ready);
    stale.await.unwrap();

    let view = session.view();
    assert_eq!(view.status, SessionStatus::Ready);
    assert_eq!(view.route.unwrap().distance_km, 2.0);
    // Worst of Ba Dinh (80) and Ha Dong (110)
    assert_eq!(view.worst_aqi, Some(110));
}

#[tokio::test]
async fn route_not_found_keeps_previous_route_intact() {
    let source = ScriptedSource::new();
    let tracker = Arc::new(PositionTracker::new(
        Arc::clone(&source) as Arc<dyn LocationSource>
    ));

    let session = RouteSession::new(
        hanoi_stations(),
        tracker,
        ScriptedRouting::new(vec![
            (Duration::ZERO, Ok(route(7.0))),
            (Duration::ZERO, Err(RouteError::NotFound)),
        ]),
    );
    session.set_start(EndpointSelection::District("Ba Dinh".to_string()));
    session.set_end(EndpointSelection::District("Hoan Kiem".to_string()));

    assert_eq!(session.analyze().await, SessionStatus::Ready);
    assert_eq!(session.analyze().await, SessionStatus::Failed);

    let view = session.view();
    assert_eq!(
        view.error.as_deref(),
        Some("no route found between the requested points")
    );
    assert_eq!(view.route.unwrap().distance_km, 7.0);
}
