//! Geographic primitives for the tracking and routing pipeline.
//!
//! Distances are planar squared Euclidean over lat/lng degrees. This is a
//! deliberate approximation: the station set is small (~30 entries) and
//! geographically compact, and positions are already gated by the
//! service-area bounds before any distance query runs.

mod types;

pub use types::{GeoBounds, LatLng, Position};

/// Squared planar distance between two coordinate pairs.
///
/// Not geodesic. Only valid for comparing distances within a compact area;
/// the result has no meaningful unit.
#[inline]
pub fn squared_distance(a: LatLng, b: LatLng) -> f64 {
    let d_lat = a.latitude - b.latitude;
    let d_lng = a.longitude - b.longitude;
    d_lat * d_lat + d_lng * d_lng
}
