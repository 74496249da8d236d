//! CleanRoute - Spatial tracking and clean-route advisory engine.
//!
//! This library provides the core pipeline behind an air-quality dashboard
//! for Hanoi districts: it ingests a live position stream, matches positions
//! against a small registry of monitoring stations, drives an external
//! routing provider, and derives a health advisory from the worst AQI value
//! found at the endpoints of a computed route.
//!
//! # High-Level API
//!
//! The [`session`] module provides the orchestrating facade:
//!
//! ```ignore
//! use std::sync::Arc;
//! use cleanroute::route::{OrsRouteClient, TransportMode};
//! use cleanroute::session::{EndpointSelection, RouteSession};
//! use cleanroute::station::StationIndex;
//! use cleanroute::tracking::PositionTracker;
//!
//! let stations = Arc::new(StationIndex::from_records(records)?);
//! let tracker = Arc::new(PositionTracker::new(source));
//! let session = RouteSession::new(stations, tracker, OrsRouteClient::new(config));
//!
//! session.set_start(EndpointSelection::CurrentLocation);
//! session.set_end(EndpointSelection::District("Hoan Kiem".to_string()));
//! session.set_mode(TransportMode::Bike);
//! session.analyze().await;
//!
//! let view = session.view();
//! ```
//!
//! # Components
//!
//! - [`geo`] - Coordinate types, service-area bounds, planar distance
//! - [`station`] - Monitoring station registry and nearest-station matching
//! - [`tracking`] - Live position tracking state machine
//! - [`route`] - Routing provider client and route normalization
//! - [`advisory`] - AQI threshold rules producing advisory strings
//! - [`session`] - Route analysis orchestration and view model
//! - [`markers`] - Declarative marker snapshots for rendering adapters

pub mod advisory;
pub mod config;
pub mod geo;
pub mod logging;
pub mod markers;
pub mod route;
pub mod session;
pub mod station;
pub mod tracking;

/// Version of the CleanRoute library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
