//! Position tracker state machine.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::config::defaults::{DEFAULT_EVENT_CAPACITY, HANOI_BOUNDS};
use crate::geo::{GeoBounds, Position};

use super::source::{LocationError, LocationSource, WatchOptions, WatchUpdate};

/// Tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    /// No active subscription.
    #[default]
    Idle,
    /// One live subscription is forwarding fixes.
    Tracking,
}

impl std::fmt::Display for TrackingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Tracking => write!(f, "Tracking"),
        }
    }
}

/// One validated fix as broadcast to consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    /// The raw fix. Never suppressed, even outside the service area.
    pub position: Position,

    /// Whether the fix lies inside the service-area bounds.
    ///
    /// Out-of-area fixes must not trigger auto-recentering of dependent
    /// views; everything else about them is delivered unchanged.
    pub in_service_area: bool,
}

/// Event broadcast by the tracker.
#[derive(Debug, Clone)]
pub enum TrackerEvent {
    /// A new fix became the current position.
    Fix(PositionFix),

    /// The subscription failed; the tracker returned to idle.
    Failed(LocationError),
}

/// Configuration for the position tracker.
#[derive(Debug, Clone)]
pub struct PositionTrackerConfig {
    /// Service-area bounds used for the containment check on each fix.
    pub bounds: GeoBounds,

    /// Options passed to the location provider when opening a watch.
    pub watch: WatchOptions,

    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
}

impl Default for PositionTrackerConfig {
    fn default() -> Self {
        Self {
            bounds: HANOI_BOUNDS,
            watch: WatchOptions::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Internal state for the tracker.
struct TrackerInner {
    /// Current state machine state.
    state: TrackingState,

    /// Latest accepted fix. Cleared on stop and on failure.
    current: Option<Position>,

    /// Subscription epoch. Bumped on every start/stop/failure so a fix
    /// delivered by a cancelled subscription can be recognized and dropped.
    epoch: u64,

    /// Cancellation token for the active forwarding task.
    cancel: Option<CancellationToken>,
}

/// Position tracker - owns the single active live-location subscription.
///
/// `start()` while already tracking is a no-op that returns the existing
/// state; `stop()` synchronously cancels the subscription and discards the
/// last known fix, so no stale position survives a stop/start cycle.
pub struct PositionTracker {
    /// Location provider.
    source: Arc<dyn LocationSource>,

    /// Internal state (thread-safe).
    inner: Arc<RwLock<TrackerInner>>,

    /// Broadcast channel for fix and failure events.
    events_tx: broadcast::Sender<TrackerEvent>,

    /// Configuration.
    config: PositionTrackerConfig,
}

impl PositionTracker {
    /// Create a tracker with default configuration.
    pub fn new(source: Arc<dyn LocationSource>) -> Self {
        Self::with_config(source, PositionTrackerConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(source: Arc<dyn LocationSource>, config: PositionTrackerConfig) -> Self {
        let (events_tx, _) = broadcast::channel(config.event_capacity);
        Self {
            source,
            inner: Arc::new(RwLock::new(TrackerInner {
                state: TrackingState::Idle,
                current: None,
                epoch: 0,
                cancel: None,
            })),
            events_tx,
            config,
        }
    }

    /// Start tracking.
    ///
    /// Opens a continuous watch on the location source and spawns a
    /// forwarding task. Calling `start()` while already tracking is a no-op
    /// returning the existing state; only one subscription is ever active.
    ///
    /// If the source cannot open a watch at all (no location capability),
    /// the tracker stays idle and broadcasts [`TrackerEvent::Failed`].
    pub fn start(&self) -> TrackingState {
        let mut inner = self.inner.write().unwrap();
        if inner.state == TrackingState::Tracking {
            tracing::debug!("start() while already tracking, keeping existing subscription");
            return TrackingState::Tracking;
        }

        let updates = match self.source.watch(self.config.watch) {
            Ok(rx) => rx,
            Err(error) => {
                tracing::warn!(error = %error, "Location watch could not be opened");
                let _ = self.events_tx.send(TrackerEvent::Failed(error));
                return TrackingState::Idle;
            }
        };

        inner.epoch += 1;
        let epoch = inner.epoch;
        let cancel = CancellationToken::new();
        inner.cancel = Some(cancel.clone());
        inner.state = TrackingState::Tracking;
        drop(inner);

        tracing::info!(
            high_accuracy = self.config.watch.high_accuracy,
            fix_timeout_secs = self.config.watch.fix_timeout.as_secs(),
            "Position tracking started"
        );

        let inner = Arc::clone(&self.inner);
        let events_tx = self.events_tx.clone();
        let bounds = self.config.bounds;
        let max_fix_age = self.config.watch.max_fix_age;
        tokio::spawn(async move {
            forward_updates(inner, events_tx, bounds, max_fix_age, epoch, cancel, updates).await;
        });

        TrackingState::Tracking
    }

    /// Stop tracking.
    ///
    /// Synchronously cancels the subscription and discards the last known
    /// fix before returning. The epoch bump guarantees that a fix already in
    /// flight from the cancelled subscription is dropped on arrival.
    pub fn stop(&self) {
        let mut inner = self.inner.write().unwrap();
        if inner.state == TrackingState::Idle {
            return;
        }
        if let Some(cancel) = inner.cancel.take() {
            cancel.cancel();
        }
        inner.state = TrackingState::Idle;
        inner.current = None;
        inner.epoch += 1;
        tracing::info!("Position tracking stopped");
    }

    /// Current state machine state.
    pub fn state(&self) -> TrackingState {
        self.inner.read().unwrap().state
    }

    /// Latest accepted fix, if any.
    pub fn current_position(&self) -> Option<Position> {
        self.inner.read().unwrap().current
    }

    /// Subscribe to fix and failure events.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events_tx.subscribe()
    }
}

/// Forwarding loop: reads provider updates until cancelled or failed.
async fn forward_updates(
    inner: Arc<RwLock<TrackerInner>>,
    events_tx: broadcast::Sender<TrackerEvent>,
    bounds: GeoBounds,
    max_fix_age: Duration,
    epoch: u64,
    cancel: CancellationToken,
    mut updates: mpsc::Receiver<WatchUpdate>,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            update = updates.recv() => match update {
                None => {
                    // Provider closed the stream without an explicit error
                    fail(
                        &inner,
                        &events_tx,
                        epoch,
                        LocationError::Unavailable("location stream ended".to_string()),
                    );
                    break;
                }
                Some(WatchUpdate::Fix { latitude, longitude, captured_at }) => {
                    deliver_fix(
                        &inner,
                        &events_tx,
                        bounds,
                        max_fix_age,
                        epoch,
                        latitude,
                        longitude,
                        captured_at,
                    );
                }
                Some(WatchUpdate::Error(error)) => {
                    fail(&inner, &events_tx, epoch, error);
                    break;
                }
            }
        }
    }
    tracing::debug!("Position forwarding task finished");
}

/// Validate and publish one fix.
#[allow(clippy::too_many_arguments)]
fn deliver_fix(
    inner: &RwLock<TrackerInner>,
    events_tx: &broadcast::Sender<TrackerEvent>,
    bounds: GeoBounds,
    max_fix_age: Duration,
    epoch: u64,
    latitude: f64,
    longitude: f64,
    captured_at: DateTime<Utc>,
) {
    // Cached fixes older than the configured limit never become current
    let age = Utc::now()
        .signed_duration_since(captured_at)
        .to_std()
        .unwrap_or(Duration::ZERO);
    if age > max_fix_age {
        tracing::debug!(
            age_secs = age.as_secs(),
            max_secs = max_fix_age.as_secs(),
            "Dropping cached fix, too old"
        );
        return;
    }

    let mut inner = inner.write().unwrap();
    if inner.epoch != epoch || inner.state != TrackingState::Tracking {
        tracing::trace!("Dropping fix from a cancelled subscription");
        return;
    }

    let position = Position::at(latitude, longitude, captured_at);
    inner.current = Some(position);

    let in_service_area = bounds.contains(latitude, longitude);
    if !in_service_area {
        tracing::debug!(latitude, longitude, "Fix outside service area");
    }

    let _ = events_tx.send(TrackerEvent::Fix(PositionFix {
        position,
        in_service_area,
    }));
}

/// Handle a provider failure: return to idle and broadcast the error.
fn fail(
    inner: &RwLock<TrackerInner>,
    events_tx: &broadcast::Sender<TrackerEvent>,
    epoch: u64,
    error: LocationError,
) {
    let mut inner = inner.write().unwrap();
    if inner.epoch != epoch {
        // A newer subscription (or an explicit stop) already superseded us
        return;
    }
    if let Some(cancel) = inner.cancel.take() {
        cancel.cancel();
    }
    inner.state = TrackingState::Idle;
    inner.current = None;
    inner.epoch += 1;
    drop(inner);

    tracing::warn!(error = %error, "Position tracking failed, returning to idle");
    let _ = events_tx.send(TrackerEvent::Failed(error));
}
