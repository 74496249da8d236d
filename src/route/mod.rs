//! Routing provider client and route normalization.
//!
//! The [`RoutingApi`] trait abstracts over routing providers; the concrete
//! [`OrsRouteClient`] drives an openrouteservice-compatible directions
//! endpoint via `reqwest` and normalizes the GeoJSON-style response into the
//! internal [`Route`] representation: provider `[lng, lat]` pairs flipped to
//! lat/lng, meters converted to kilometers, seconds to minutes, and at most
//! five step instructions from the first segment.
//!
//! The client is stateless per call and never retries; superseding an
//! in-flight request is the orchestrator's job (last-request-wins by
//! sequence number, see [`crate::session`]).

mod client;
mod error;
mod types;

pub use client::{
    normalize_response, DirectionsResponse, OrsRouteClient, RoutingApi, RoutingConfig,
};
pub use error::RouteError;
pub use types::{Route, RouteRequest, TransportMode, MAX_STEP_INSTRUCTIONS};
