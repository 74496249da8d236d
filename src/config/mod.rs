//! Configuration defaults for the tracking and routing pipeline.
//!
//! Component configuration lives next to each component
//! ([`crate::tracker::WatchOptions`], [`crate::route::RoutingConfig`],
//! [`crate::session::SessionConfig`]); this module centralizes the
//! `DEFAULT_*` constants those `Default` implementations pull from, so the
//! operational knobs of the whole engine are visible in one place.

pub mod defaults;
