//! Location source trait and watch types.
//!
//! The [`LocationSource`] trait abstracts over live location providers.
//! A provider opens a continuous watch and pushes [`WatchUpdate`]s into a
//! channel; dropping the receiver (or cancelling the tracker's forwarding
//! task) ends the subscription.

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::defaults::{DEFAULT_FIX_TIMEOUT, DEFAULT_HIGH_ACCURACY, DEFAULT_MAX_FIX_AGE};

/// Options for a continuous location watch.
///
/// Mirrors the request made to the underlying provider: accuracy hint,
/// per-fix timeout, and the maximum acceptable age of a cached fix.
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// Request high-accuracy fixes (GPS rather than network triangulation).
    pub high_accuracy: bool,

    /// Maximum time the provider may take to produce a single fix.
    pub fix_timeout: Duration,

    /// Maximum age of a cached fix the tracker will accept.
    ///
    /// Providers may serve a cached last-known position; anything older
    /// than this is dropped instead of becoming the current position.
    pub max_fix_age: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: DEFAULT_HIGH_ACCURACY,
            fix_timeout: DEFAULT_FIX_TIMEOUT,
            max_fix_age: DEFAULT_MAX_FIX_AGE,
        }
    }
}

/// One update from a location provider watch.
#[derive(Debug, Clone)]
pub enum WatchUpdate {
    /// A raw position fix. Delivered in wall-clock order.
    Fix {
        latitude: f64,
        longitude: f64,
        /// When the provider captured the fix (may predate delivery for
        /// cached fixes).
        captured_at: DateTime<Utc>,
    },

    /// A typed provider failure. The watch is considered dead after this.
    Error(LocationError),
}

/// Errors reported by a location provider.
///
/// `Clone` so failures can be broadcast to every subscriber. Each variant
/// carries a human-readable detail string for user display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    /// The device/environment lacks a location capability. Fatal for the
    /// session until retried.
    #[error("location is not supported here: {0}")]
    Unsupported(String),

    /// The user declined the location permission. Recoverable only by user
    /// action outside this engine.
    #[error("location permission denied: {0}")]
    PermissionDenied(String),

    /// Transient provider failure (no GPS or signal). Safe to retry.
    #[error("location temporarily unavailable: {0}")]
    Unavailable(String),

    /// No fix was obtained within the configured timeout. Safe to retry.
    #[error("location fix timed out: {0}")]
    Timeout(String),
}

/// Trait for live location providers.
///
/// `watch` opens a continuous subscription and returns the receiving end of
/// its update stream. It fails immediately with
/// [`LocationError::Unsupported`] when the environment has no location
/// capability at all; permission and signal problems arrive as
/// [`WatchUpdate::Error`] on the stream.
pub trait LocationSource: Send + Sync {
    fn watch(&self, options: WatchOptions) -> Result<mpsc::Receiver<WatchUpdate>, LocationError>;
}
