//! Read-only session view model.

use crate::markers::MarkerSet;

use super::state::SessionStatus;

/// Route summary for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Cumulative distance in kilometers.
    pub distance_km: f64,

    /// Cumulative duration in minutes.
    pub duration_min: f64,

    /// Up to five human-readable step instructions.
    pub steps: Vec<String>,
}

/// Snapshot of the session for the presentation layer.
///
/// Plain read-only data; no presentation-layer callback is part of the
/// core. Rebuilt on every call, never shared mutable state.
#[derive(Debug, Clone)]
pub struct SessionView {
    /// Current session status.
    pub status: SessionStatus,

    /// Summary of the current route, if one has been computed.
    ///
    /// Survives a failed re-analysis: a failure never clears the previous
    /// route.
    pub route: Option<RouteSummary>,

    /// Worst AQI among the stations nearest to the route endpoints.
    pub worst_aqi: Option<i32>,

    /// Ordered advisory strings for the current route.
    pub advisories: Vec<String>,

    /// Failure reason, verbatim, when status is `Failed`.
    pub error: Option<String>,

    /// Declarative marker snapshot for the rendering adapter.
    pub markers: MarkerSet,
}
