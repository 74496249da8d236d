//! Live position tracking.
//!
//! The [`PositionTracker`] owns the single active live-location subscription
//! and the latest [`crate::geo::Position`]. It is a two-state machine:
//!
//! - **Idle** - no subscription, no retained fix
//! - **Tracking** - one forwarding task reads the provider stream, validates
//!   each fix against the service-area bounds, and broadcasts it
//!
//! The underlying provider sits behind the [`LocationSource`] trait, so the
//! engine never talks to a platform geolocation API directly. The provider
//! delivers fixes over a channel with an explicit stop signal rather than a
//! raw callback with subscription-id bookkeeping.
//!
//! # Usage
//!
//! ```ignore
//! use cleanroute::tracking::{PositionTracker, TrackerEvent};
//!
//! let tracker = PositionTracker::new(source);
//! let mut events = tracker.subscribe();
//!
//! tracker.start();
//! while let Ok(event) = events.recv().await {
//!     match event {
//!         TrackerEvent::Fix(fix) => println!("fix: {}", fix.position.lat_lng()),
//!         TrackerEvent::Failed(error) => eprintln!("tracking failed: {error}"),
//!     }
//! }
//! tracker.stop();
//! ```

mod source;
mod tracker;

pub use source::{LocationError, LocationSource, WatchOptions, WatchUpdate};
pub use tracker::{
    PositionFix, PositionTracker, PositionTrackerConfig, TrackerEvent, TrackingState,
};
