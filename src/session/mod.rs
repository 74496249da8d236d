//! Route analysis orchestration.
//!
//! The [`RouteSession`] ties the pipeline together: it holds the start/end
//! endpoint selections, resolves them to concrete coordinates (district
//! registry, map point, or the tracker's live fix), drives the routing
//! client, merges AQI context from the station index, and exposes a single
//! read-only [`SessionView`] to the presentation layer.
//!
//! # Concurrency
//!
//! One session instance drives one map view. Route fetches are one-shot
//! async calls whose results are not guaranteed to resolve in issue order;
//! the session enforces last-request-wins with a monotonically increasing
//! request sequence number compared at resolution time. A superseded
//! result, success or failure, never touches session state.

mod orchestrator;
mod state;
mod view;

pub use orchestrator::{RouteSession, SessionConfig};
pub use state::{EndpointSelection, SessionError, SessionStatus};
pub use view::{RouteSummary, SessionView};
