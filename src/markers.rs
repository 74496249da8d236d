//! Declarative marker snapshots for rendering adapters.
//!
//! The core never manipulates map-layer objects imperatively. Instead the
//! session publishes an immutable [`MarkerSet`] snapshot; a rendering
//! adapter diffs consecutive snapshots with [`MarkerSet::diff`] and applies
//! only the changes. The map widget is a pure external sink.

use crate::geo::LatLng;

/// What a marker represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// A monitoring station.
    Station,
    /// The device's current position.
    CurrentPosition,
    /// A resolved route endpoint.
    RouteEndpoint,
}

/// One marker in a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Stable identity used for diffing (e.g. `station:Hoan Kiem`).
    pub id: String,

    /// Marker coordinates.
    pub position: LatLng,

    /// Marker kind, consumed by the adapter's styling.
    pub kind: MarkerKind,

    /// Display label.
    pub label: String,
}

impl Marker {
    pub fn new(
        id: impl Into<String>,
        position: LatLng,
        kind: MarkerKind,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            kind,
            label: label.into(),
        }
    }
}

/// An immutable marker snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

/// Changes between two consecutive snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerDiff {
    /// Markers to add or replace (present in the next snapshot but missing
    /// from, or different in, the previous one).
    pub upserted: Vec<Marker>,

    /// Ids of markers to remove.
    pub removed: Vec<String>,
}

impl MarkerDiff {
    /// True if the snapshots were identical.
    pub fn is_empty(&self) -> bool {
        self.upserted.is_empty() && self.removed.is_empty()
    }
}

impl MarkerSet {
    /// Build a snapshot from markers.
    ///
    /// Order is preserved; ids are expected to be unique within a snapshot.
    pub fn new(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    /// All markers in snapshot order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Compute the changes a rendering adapter must apply to get from this
    /// snapshot to `next`.
    pub fn diff(&self, next: &MarkerSet) -> MarkerDiff {
        let upserted = next
            .markers
            .iter()
            .filter(|marker| {
                self.markers
                    .iter()
                    .find(|previous| previous.id == marker.id)
                    .is_none_or(|previous| previous != *marker)
            })
            .cloned()
            .collect();

        let removed = self
            .markers
            .iter()
            .filter(|marker| !next.markers.iter().any(|n| n.id == marker.id))
            .map(|marker| marker.id.clone())
            .collect();

        MarkerDiff { upserted, removed }
    }
}
