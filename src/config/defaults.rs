//! Default values and constants for all configuration settings.

use std::time::Duration;

use crate::geo::GeoBounds;

// =============================================================================
// Service area
// =============================================================================

/// Hanoi metro service area.
///
/// Positions outside these bounds are still delivered to consumers but must
/// not trigger auto-recentering of dependent views.
pub const HANOI_BOUNDS: GeoBounds = GeoBounds::new(20.80, 21.25, 105.60, 106.05);

// =============================================================================
// Location watch
// =============================================================================

/// Request high-accuracy fixes from the location provider by default.
pub const DEFAULT_HIGH_ACCURACY: bool = true;

/// Maximum time the provider may take to produce a single fix.
pub const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum age of a cached fix the tracker will accept as current.
pub const DEFAULT_MAX_FIX_AGE: Duration = Duration::from_secs(30);

/// Capacity of the tracker event broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

// =============================================================================
// Routing provider
// =============================================================================

/// Base URL of the routing provider.
pub const DEFAULT_ROUTING_BASE_URL: &str = "https://api.openrouteservice.org";

/// HTTP timeout for routing requests.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Session
// =============================================================================

/// How long the session waits for a first fix when the start endpoint is
/// the current location and no fix is available yet.
pub const DEFAULT_LOCATION_WAIT: Duration = Duration::from_secs(15);
