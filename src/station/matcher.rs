//! Brute-force nearest-station matching.

use crate::geo::{squared_distance, LatLng};

use super::index::StationIndex;
use super::model::Station;

/// Return the station closest to `point`.
///
/// Linear scan over the index computing squared Euclidean distance in
/// lat/lng space. Ties resolve to the first station in snapshot order,
/// making the result deterministic for identical inputs.
///
/// # Panics
///
/// Panics if the index is empty. Callers must guarantee a non-empty index;
/// an empty index at query time is a programming error and no fallback
/// sentinel is defined.
pub fn nearest<'a>(index: &'a StationIndex, point: LatLng) -> &'a Station {
    assert!(
        !index.is_empty(),
        "nearest() requires a non-empty station index"
    );

    let mut best = &index.all()[0];
    let mut best_distance = squared_distance(point, best.lat_lng());

    for station in index.iter().skip(1) {
        let distance = squared_distance(point, station.lat_lng());
        // Strict comparison keeps the earliest station on ties
        if distance < best_distance {
            best = station;
            best_distance = distance;
        }
    }

    best
}
