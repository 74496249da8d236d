//! Coordinate type definitions.

use chrono::{DateTime, Utc};

/// A plain latitude/longitude pair.
///
/// Used for route geometry points and resolved endpoint coordinates.
/// Latitude in degrees (-90 to 90), longitude in degrees (-180 to 180).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// One reported device position at a point in time.
///
/// Ephemeral: only the latest fix is retained by the tracker, and it is
/// discarded on `stop()`. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// When the provider captured this fix.
    ///
    /// Providers may deliver cached fixes; consumers use this to judge
    /// freshness against the configured maximum fix age.
    pub captured_at: DateTime<Utc>,
}

impl Position {
    /// Create a position captured now.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            captured_at: Utc::now(),
        }
    }

    /// Create a position with an explicit capture timestamp.
    pub fn at(latitude: f64, longitude: f64, captured_at: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            captured_at,
        }
    }

    /// The coordinate pair without the capture timestamp.
    #[inline]
    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// A rectangular geographic bounding box.
///
/// Describes the service area. Positions outside the bounds are still
/// delivered to consumers (the raw fix is never suppressed) but must not
/// trigger auto-recentering of dependent views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Pure containment predicate, inclusive on all edges.
    #[inline]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lng
            && longitude <= self.max_lng
    }

    /// Containment check for a coordinate pair.
    #[inline]
    pub fn contains_point(&self, point: LatLng) -> bool {
        self.contains(point.latitude, point.longitude)
    }
}
