//! Gesture tracker: turns pointer press/move/release into swipe notifications.
//!
//! State machine: `Idle -(start)-> Tracking -(end)-> Idle`. Moves loop on
//! `Tracking` and are ignored on `Idle`. A second start while tracking
//! overwrites the open gesture without closing it.

use crate::{
    Notifier, PointerSample, SurfaceId, SwipeDirection, SwipeError, SwipeEvent, SwipeResult,
    TrackerConfig,
};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Snapshot of a gesture handed to listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRecord {
    pub start_x: f64,
    pub start_y: f64,
    pub start_time: Instant,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    /// Set only once the gesture has ended.
    pub end_time: Option<Instant>,
    /// Total gesture duration, set only once the gesture has ended.
    pub dt: Option<Duration>,
}

impl MoveRecord {
    /// Fresh record for a gesture opened at `(x, y)`.
    pub fn starting_at(x: f64, y: f64, start_time: Instant) -> Self {
        Self {
            start_x: x,
            start_y: y,
            start_time,
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            end_time: None,
            dt: None,
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.dx = x - self.start_x;
        self.dy = y - self.start_y;
    }

    fn finish(&mut self, x: f64, y: f64, end_time: Instant) {
        self.move_to(x, y);
        self.end_time = Some(end_time);
        self.dt = Some(end_time.saturating_duration_since(self.start_time));
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn dt_ms(&self) -> Option<u64> {
        self.dt.map(|dt| dt.as_millis() as u64)
    }
}

/// Mutable per-tracker gesture state.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureState {
    active: bool,
    /// Latest snapshot; `None` until the first press.
    record: Option<MoveRecord>,
    threshold: f64,
}

impl GestureState {
    fn new(threshold: f64) -> Self {
        Self { active: false, record: None, threshold }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn record(&self) -> Option<&MoveRecord> {
        self.record.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current `(dx, dy)`; zero before the first press.
    pub fn delta(&self) -> (f64, f64) {
        self.record.map_or((0.0, 0.0), |r| (r.dx, r.dy))
    }
}

/// Which pointer phases a sink currently wants delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interest {
    /// Presses on the sink's surface.
    pub start: bool,
    /// Moves, releases and cancellations.
    pub motion: bool,
}

impl Interest {
    pub const NONE: Interest = Interest { start: false, motion: false };
}

/// Consumer of normalized pointer input, driven by an input adapter.
pub trait PointerSink {
    /// Surface whose presses and moves this sink listens to.
    fn surface(&self) -> SurfaceId;

    /// Phases to deliver. Adapters consult this before every event.
    fn interest(&self) -> Interest;

    fn on_pointer_start(&mut self, sample: &PointerSample);
    fn on_pointer_move(&mut self, sample: &PointerSample);
    fn on_pointer_end(&mut self, sample: &PointerSample);

    /// The platform took the pointer away (touch cancel, capture lost).
    fn on_pointer_cancel(&mut self);

    /// Drop an open gesture that outlived its timeout. Returns true if one was dropped.
    fn expire_stale(&mut self, _now: Instant) -> bool {
        false
    }
}

/// Recognizes single-pointer swipes on one surface.
pub struct GestureTracker<N: Notifier> {
    surface: SurfaceId,
    state: GestureState,
    gesture_timeout: Option<Duration>,
    notifier: N,
    released: bool,
}

impl<N: Notifier> GestureTracker<N> {
    /// Create a tracker with the default threshold.
    pub fn create(surface: Option<SurfaceId>, notifier: N) -> SwipeResult<Self> {
        Self::with_config(surface, notifier, TrackerConfig::default())
    }

    pub fn with_config(
        surface: Option<SurfaceId>,
        notifier: N,
        config: TrackerConfig,
    ) -> SwipeResult<Self> {
        let surface = surface
            .ok_or_else(|| SwipeError::InvalidArgument("GestureTracker requires a surface".into()))?;
        config.validate()?;

        debug!(%surface, threshold = config.threshold, "Gesture tracker attached");
        Ok(Self {
            surface,
            state: GestureState::new(config.threshold),
            gesture_timeout: config.gesture_timeout(),
            notifier,
            released: false,
        })
    }

    /// Set the per-axis threshold used by the next gesture end.
    pub fn configure_threshold(&mut self, threshold: f64) {
        self.state.threshold = threshold;
    }

    pub fn threshold(&self) -> f64 {
        self.state.threshold
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Release the tracker and hand back its notifier.
    pub fn into_notifier(mut self) -> N {
        self.teardown();
        self.notifier
    }

    /// Open a gesture, overwriting any gesture still in flight.
    pub fn on_pointer_start(&mut self, sample: &PointerSample) {
        if self.released {
            return;
        }
        if self.state.active {
            debug!(surface = %self.surface, "Abandoning open gesture for new press");
        }

        self.state.active = true;
        self.state.record = Some(MoveRecord::starting_at(sample.x, sample.y, sample.timestamp));

        debug!(surface = %self.surface, x = sample.x, y = sample.y, "Gesture started");
        self.emit(SwipeEvent::SwipeStart);
    }

    /// Track the pointer. Ignored while idle or while more than one touch is down.
    pub fn on_pointer_move(&mut self, sample: &PointerSample) {
        if !self.state.active {
            return;
        }
        if sample.is_multi_touch() {
            trace!(touches = sample.touch_count, "Ignoring multi-touch move");
            return;
        }
        let Some(record) = self.state.record.as_mut() else {
            return;
        };

        record.move_to(sample.x, sample.y);
        trace!(dx = record.dx, dy = record.dy, "Gesture moved");
        self.emit(SwipeEvent::Move);
    }

    /// Close the gesture and classify it.
    pub fn on_pointer_end(&mut self, sample: &PointerSample) {
        if !self.state.active {
            return;
        }
        let Some(record) = self.state.record.as_mut() else {
            return;
        };

        record.finish(sample.x, sample.y, sample.timestamp);
        let (dx, dy) = (record.dx, record.dy);
        // Closed before anyone hears about it.
        self.state.active = false;

        debug!(surface = %self.surface, dx, dy, dt_ms = ?record.dt_ms(), "Gesture ended");
        self.emit(SwipeEvent::SwipeEnd);

        for direction in SwipeDirection::classify(dx, dy, self.state.threshold)
            .into_iter()
            .flatten()
        {
            self.emit(direction.event());
        }
    }

    /// Abandon the open gesture without notifying anyone.
    pub fn on_pointer_cancel(&mut self) {
        if !self.state.active {
            return;
        }
        self.state.active = false;
        debug!(surface = %self.surface, "Gesture cancelled");
    }

    /// Abandon the open gesture if it has been open longer than the configured timeout.
    pub fn expire_stale(&mut self, now: Instant) -> bool {
        let (Some(timeout), true) = (self.gesture_timeout, self.state.active) else {
            return false;
        };
        let Some(record) = self.state.record else {
            return false;
        };

        let age = now.saturating_duration_since(record.start_time);
        if age <= timeout {
            return false;
        }

        self.state.active = false;
        let age_ms = age.as_millis() as u64;
        debug!(surface = %self.surface, age_ms, "Gesture expired");
        true
    }

    /// Stop listening. Every later input is ignored and nothing more is emitted.
    pub fn teardown(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.state.active = false;
        info!(surface = %self.surface, "Gesture tracker released");
    }

    fn emit(&mut self, event: SwipeEvent) {
        if self.released {
            return;
        }
        if let Some(record) = self.state.record {
            self.notifier.emit(event, &record);
        }
    }
}

impl<N: Notifier> PointerSink for GestureTracker<N> {
    fn surface(&self) -> SurfaceId {
        self.surface
    }

    fn interest(&self) -> Interest {
        if self.released {
            return Interest::NONE;
        }
        Interest { start: true, motion: self.state.active }
    }

    fn on_pointer_start(&mut self, sample: &PointerSample) {
        GestureTracker::on_pointer_start(self, sample)
    }

    fn on_pointer_move(&mut self, sample: &PointerSample) {
        GestureTracker::on_pointer_move(self, sample)
    }

    fn on_pointer_end(&mut self, sample: &PointerSample) {
        GestureTracker::on_pointer_end(self, sample)
    }

    fn on_pointer_cancel(&mut self) {
        GestureTracker::on_pointer_cancel(self)
    }

    fn expire_stale(&mut self, now: Instant) -> bool {
        GestureTracker::expire_stale(self, now)
    }
}
