//! Station index for district name lookup and ordered iteration.

use super::model::{Station, StationRecord};

/// Error type for station index construction.
#[derive(Debug, thiserror::Error)]
pub enum StationIndexError {
    /// Two feed rows carried the same district name.
    #[error("duplicate station in feed snapshot: {0}")]
    DuplicateStation(String),
}

/// Immutable registry of monitoring stations for one feed snapshot.
///
/// Stations keep feed order; that order is the deterministic tie-break for
/// nearest-neighbor queries. The index is read-only after construction and
/// replaced wholesale on feed refresh.
#[derive(Debug, Default)]
pub struct StationIndex {
    stations: Vec<Station>,
}

impl StationIndex {
    /// Create an empty station index.
    pub fn new() -> Self {
        Self {
            stations: Vec::new(),
        }
    }

    /// Build an index from a feed snapshot.
    ///
    /// Station names must be unique within one snapshot; a duplicate
    /// district name is a feed defect and rejected outright.
    pub fn from_records(records: Vec<StationRecord>) -> Result<Self, StationIndexError> {
        let mut stations: Vec<Station> = Vec::with_capacity(records.len());

        for record in records {
            if stations
                .iter()
                .any(|s| s.name.eq_ignore_ascii_case(&record.district))
            {
                return Err(StationIndexError::DuplicateStation(record.district));
            }
            stations.push(Station::from(record));
        }

        tracing::info!(count = stations.len(), "Built station index");

        Ok(Self { stations })
    }

    /// Get a station by district name, case-insensitive.
    ///
    /// Returns `None` if the station is not found. Linear scan: the index
    /// holds at most a few dozen entries.
    pub fn lookup(&self, name: &str) -> Option<&Station> {
        let name = name.trim();
        self.stations
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// All stations in snapshot order.
    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    /// Returns the number of stations in the index.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Returns an iterator over all stations in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }
}
