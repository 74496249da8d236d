//! AQI advisory rules.
//!
//! [`advise`] is a pure function mapping the worst AQI along a route (or at
//! a point) and a transport mode to an ordered list of advisory strings.
//! The general severity band comes first, then the mode-specific additions.
//! Same inputs always yield the same output.
//!
//! The thresholds are the hand-tuned values the dashboard has always used;
//! they are not asserted to be medically authoritative.

use crate::route::TransportMode;

// General band, evaluated top-down, first match wins.
const GENERAL_GOOD: &str = "Air quality is good, favorable for travel.";
const GENERAL_MODERATE: &str = "Air quality is moderate, acceptable for travel.";
const GENERAL_POOR: &str = "Air quality is poor, possible respiratory impact.";
const GENERAL_SEVERE: &str = "Severe pollution warning, avoid non-essential travel.";

// Bike
const BIKE_MASK_CERTIFIED: &str =
    "Direct exposure risk, wear a certified filtering mask (N95 or better).";
const BIKE_MASK_BASIC: &str = "Wear a basic mask while riding.";
const BIKE_EYE_SHIELD: &str = "Use glasses or a visor to shield your eyes from dust.";

// Car
const CAR_RECIRCULATE: &str = "Keep windows closed and use recirculated cabin air.";
const CAR_CABIN_FILTER: &str = "Check the cabin air filter before longer trips.";

// Bus
const BUS_SHELTER: &str = "Wait under shelter, away from the roadway.";
const BUS_MASK: &str = "Wear a mask for the duration of the trip.";

/// AQI threshold above which the air is no longer considered good.
const AQI_GOOD_MAX: i32 = 50;

/// AQI threshold above which the air is no longer considered moderate.
const AQI_MODERATE_MAX: i32 = 100;

/// AQI threshold above which the severe pollution warning applies.
const AQI_POOR_MAX: i32 = 150;

/// Derive the ordered advisory list for a worst AQI value and transport mode.
///
/// The general band string comes first (thresholds are non-overlapping and
/// evaluated top-down), followed by the mode-specific recommendations.
/// Referentially transparent: identical inputs yield an identical list.
pub fn advise(worst_aqi: i32, mode: TransportMode) -> Vec<String> {
    let mut advisories = Vec::with_capacity(4);

    let general = if worst_aqi <= AQI_GOOD_MAX {
        GENERAL_GOOD
    } else if worst_aqi <= AQI_MODERATE_MAX {
        GENERAL_MODERATE
    } else if worst_aqi <= AQI_POOR_MAX {
        GENERAL_POOR
    } else {
        GENERAL_SEVERE
    };
    advisories.push(general.to_string());

    match mode {
        TransportMode::Bike => {
            if worst_aqi > AQI_MODERATE_MAX {
                advisories.push(BIKE_MASK_CERTIFIED.to_string());
            } else {
                advisories.push(BIKE_MASK_BASIC.to_string());
            }
            advisories.push(BIKE_EYE_SHIELD.to_string());
        }
        TransportMode::Car => {
            advisories.push(CAR_RECIRCULATE.to_string());
            if worst_aqi > AQI_POOR_MAX {
                advisories.push(CAR_CABIN_FILTER.to_string());
            }
        }
        TransportMode::Bus => {
            advisories.push(BUS_SHELTER.to_string());
            if worst_aqi > AQI_MODERATE_MAX {
                advisories.push(BUS_MASK.to_string());
            }
        }
    }

    advisories
}
