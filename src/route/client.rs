//! Routing API trait and openrouteservice-compatible implementation.
//!
//! The [`RoutingApi`] trait abstracts over routing providers so the session
//! can be tested against a scripted mock. The [`OrsRouteClient`] issues one
//! `GET` per call against a directions endpoint and normalizes the
//! GeoJSON-style response via [`normalize_response`], a pure function that
//! is unit-testable without any network.

use std::future::Future;

use serde::Deserialize;

use crate::config::defaults::{DEFAULT_HTTP_TIMEOUT, DEFAULT_ROUTING_BASE_URL};
use crate::geo::LatLng;

use super::error::RouteError;
use super::types::{Route, RouteRequest, MAX_STEP_INSTRUCTIONS};

/// Trait for fetching a route between two resolved endpoints.
///
/// Implementations issue exactly one outbound request per call and never
/// retry automatically.
pub trait RoutingApi: Send + Sync {
    /// Fetch and normalize a route for the given request.
    fn fetch_route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<Route, RouteError>> + Send;
}

/// Configuration for the openrouteservice client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL of the directions service.
    pub base_url: String,

    /// Provider API key, passed as a query parameter.
    pub api_key: String,

    /// Per-request HTTP timeout.
    pub timeout: std::time::Duration,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ROUTING_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

/// Routing client for an openrouteservice-compatible directions endpoint.
///
/// Uses a reusable `reqwest::Client` with connection pooling and a request
/// timeout. Stateless per call; staleness of superseded requests is handled
/// by the orchestrator.
pub struct OrsRouteClient {
    /// Reusable HTTP client with connection pooling.
    http: reqwest::Client,

    /// Configuration.
    config: RoutingConfig,
}

impl OrsRouteClient {
    /// Create a new routing client.
    pub fn new(config: RoutingConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { http, config }
    }

    /// Directions URL for a transport mode.
    fn directions_url(&self, request: &RouteRequest) -> String {
        format!(
            "{}/v2/directions/{}",
            self.config.base_url.trim_end_matches('/'),
            request.mode.profile()
        )
    }
}

impl RoutingApi for OrsRouteClient {
    async fn fetch_route(&self, request: &RouteRequest) -> Result<Route, RouteError> {
        let url = self.directions_url(request);
        // Provider convention is lng,lat
        let start = coordinate_param(request.start);
        let end = coordinate_param(request.end);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("start", start.as_str()),
                ("end", end.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RouteError::ProviderUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "Routing request rejected");
            return Err(RouteError::ProviderStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RouteError::ProviderUnreachable(e.to_string()))?;

        let document: DirectionsResponse = serde_json::from_slice(&bytes)
            .map_err(|e| RouteError::MalformedResponse(e.to_string()))?;

        let route = normalize_response(document)?;

        tracing::debug!(
            mode = %request.mode,
            points = route.points.len(),
            distance_km = route.distance_km,
            duration_min = route.duration_min,
            "Route fetched"
        );

        Ok(route)
    }
}

/// `start`/`end` query parameter in the provider's lng,lat order.
fn coordinate_param(point: LatLng) -> String {
    format!("{},{}", point.longitude, point.latitude)
}

// =============================================================================
// Provider wire format
// =============================================================================

/// Top-level directions response.
///
/// We only deserialize the `features` array; other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// Coordinate pairs in the provider's `[lng, lat]` order.
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Option<Summary>,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    /// Cumulative distance in meters.
    #[serde(default)]
    distance: f64,
    /// Cumulative duration in seconds.
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    instruction: String,
}

/// Normalize a provider response into a [`Route`].
///
/// Absence of `features[0].geometry.coordinates` is treated as "no route
/// found". Coordinates are flipped from lng/lat to lat/lng, distance from
/// meters to kilometers, duration from seconds to minutes, and at most
/// [`MAX_STEP_INSTRUCTIONS`] instructions are kept from the first segment.
pub fn normalize_response(document: DirectionsResponse) -> Result<Route, RouteError> {
    let feature = document
        .features
        .into_iter()
        .next()
        .ok_or(RouteError::NotFound)?;

    let coordinates = feature
        .geometry
        .map(|g| g.coordinates)
        .filter(|c| !c.is_empty())
        .ok_or(RouteError::NotFound)?;

    let points = coordinates
        .into_iter()
        .map(|[lng, lat]| LatLng::new(lat, lng))
        .collect();

    let (distance_km, duration_min, steps) = match feature.properties {
        Some(properties) => {
            let (distance_km, duration_min) = properties
                .summary
                .map(|s| (s.distance / 1000.0, s.duration / 60.0))
                .unwrap_or((0.0, 0.0));

            let steps = properties
                .segments
                .into_iter()
                .next()
                .map(|segment| {
                    segment
                        .steps
                        .into_iter()
                        .take(MAX_STEP_INSTRUCTIONS)
                        .map(|step| step.instruction)
                        .collect()
                })
                .unwrap_or_default();

            (distance_km, duration_min, steps)
        }
        None => (0.0, 0.0, Vec::new()),
    };

    Ok(Route {
        points,
        distance_km,
        duration_min,
        steps,
    })
}
