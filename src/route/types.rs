//! Route request and route types.

use crate::geo::LatLng;

/// Maximum number of step instructions kept from a provider response.
pub const MAX_STEP_INSTRUCTIONS: usize = 5;

/// Transport mode for a route request.
///
/// Drives both the provider routing profile and the mode-specific advisory
/// rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Bike,
    Bus,
    Car,
}

impl TransportMode {
    /// Routing profile understood by the directions endpoint.
    ///
    /// There is no dedicated bus profile; bus routes follow the road
    /// network like cars.
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Bike => "cycling-regular",
            Self::Bus | Self::Car => "driving-car",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bike => write!(f, "Bike"),
            Self::Bus => write!(f, "Bus"),
            Self::Car => write!(f, "Car"),
        }
    }
}

/// One routing request between two resolved endpoints.
///
/// Constructed per user action; both endpoints must already be concrete,
/// resolvable coordinates (the session validates before building one).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub start: LatLng,
    pub end: LatLng,
    pub mode: TransportMode,
}

/// A normalized route.
///
/// Immutable; superseded entirely by the next successful request. A failed
/// or superseded request never partially overwrites an existing route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Path geometry in lat/lng order (flipped from the provider's
    /// lng/lat convention).
    pub points: Vec<LatLng>,

    /// Cumulative distance in kilometers.
    pub distance_km: f64,

    /// Cumulative duration in minutes.
    pub duration_min: f64,

    /// Up to [`MAX_STEP_INSTRUCTIONS`] human-readable step instructions
    /// from the first route segment.
    pub steps: Vec<String>,
}
