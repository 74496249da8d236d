//! Session state types.

use thiserror::Error;

use crate::geo::LatLng;
use crate::route::RouteError;
use crate::tracking::LocationError;

/// How one end of the route is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointSelection {
    /// A monitoring district by name (covers free-text input resolved
    /// against the station registry).
    District(String),

    /// An explicit coordinate, e.g. from a map click.
    Point(LatLng),

    /// The tracker's live position.
    CurrentLocation,
}

/// Session status as exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No analysis requested yet.
    #[default]
    Idle,
    /// The start endpoint is the current location and no fix is available
    /// yet; waiting on the tracker.
    AwaitingLocation,
    /// A route request is in flight.
    Fetching,
    /// The latest analysis succeeded.
    Ready,
    /// The latest analysis failed; the reason is preserved verbatim.
    Failed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::AwaitingLocation => write!(f, "AwaitingLocation"),
            Self::Fetching => write!(f, "Fetching"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Errors recorded in a failed session state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// Analysis was requested without two selected endpoints. Usage error,
    /// not retryable without fixing the input.
    #[error("both endpoints are required before analyzing a route")]
    MissingEndpoints,

    /// A district selection did not resolve against the station registry.
    #[error("unknown district: {0}")]
    UnknownDistrict(String),

    /// The position tracker failed while resolving the current location.
    #[error(transparent)]
    Location(#[from] LocationError),

    /// The routing client failed.
    #[error(transparent)]
    Route(#[from] RouteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_status_display() {
        assert_eq!(SessionStatus::AwaitingLocation.to_string(), "AwaitingLocation");
        assert_eq!(SessionStatus::Ready.to_string(), "Ready");
    }

    #[test]
    fn test_underlying_errors_surface_verbatim() {
        let error = SessionError::from(RouteError::NotFound);
        assert_eq!(
            error.to_string(),
            "no route found between the requested points"
        );

        let error = SessionError::from(LocationError::PermissionDenied(
            "user declined the prompt".to_string(),
        ));
        assert_eq!(
            error.to_string(),
            "location permission denied: user declined the prompt"
        );
    }
}
