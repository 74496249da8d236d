//! Station data types.

use serde::Deserialize;

use crate::geo::LatLng;

/// One row of the external AQI feed snapshot.
///
/// This is our own type, decoupled from the feed's transport format.
/// Extra fields in the feed payload are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    pub district: String,
    pub latitude: f64,
    pub longitude: f64,
    pub aqi: i32,
    pub pollution_level: String,
    pub color: String,
}

/// A fixed monitoring point with a district name, coordinates, and the
/// current AQI reading.
///
/// Immutable for the lifetime of a [`super::StationIndex`] snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// District name, unique within one snapshot.
    pub name: String,

    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Current Air Quality Index reading.
    pub aqi: i32,

    /// Human-readable pollution severity label from the feed.
    pub pollution_level: String,

    /// Display color hint from the feed (consumed by the presentation layer).
    pub color_hint: String,
}

impl Station {
    /// The station's coordinate pair.
    #[inline]
    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

impl From<StationRecord> for Station {
    fn from(record: StationRecord) -> Self {
        Self {
            name: record.district,
            latitude: record.latitude,
            longitude: record.longitude,
            aqi: record.aqi,
            pollution_level: record.pollution_level,
            color_hint: record.color,
        }
    }
}
