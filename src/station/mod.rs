//! Monitoring station registry and nearest-station matching.
//!
//! The [`StationIndex`] is an immutable snapshot of the district monitoring
//! stations. It is rebuilt wholesale whenever the external AQI feed delivers
//! a new snapshot (an atomic swap of the `Arc<StationIndex>` performed by
//! the data-loading collaborator) and never mutated in place, so it can be
//! shared across concurrent readers without locking.
//!
//! [`nearest`] performs brute-force nearest-neighbor matching over the
//! index. With ~30 stations a linear scan beats any spatial index.

mod index;
mod matcher;
mod model;

pub use index::{StationIndex, StationIndexError};
pub use matcher::nearest;
pub use model::{Station, StationRecord};
