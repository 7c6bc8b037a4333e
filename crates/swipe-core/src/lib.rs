//! swipe-core: single-pointer swipe recognition.
//!
//! Design goal: keep this crate platform-agnostic. Device event normalization
//! and listener scoping live in `swipe-platform`; this crate only consumes
//! already-normalized [`PointerSample`]s and reports what it recognized through
//! a [`Notifier`].

mod config;
mod error;
mod event;
mod notifier;
mod tracker;

pub use config::{
    default_config_path, load_file, load_or_default, parse_json, parse_yaml, TrackerConfig,
    DEFAULT_THRESHOLD,
};
pub use error::{ConfigError, ConfigResult, SwipeError, SwipeResult};
pub use event::{SwipeDirection, SwipeEvent, UnknownEventName};
pub use notifier::{ChannelNotifier, Emitter, ListenerId, Notification, Notifier};
pub use tracker::{GestureState, GestureTracker, Interest, MoveRecord, PointerSink};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Identifies the surface a tracker is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Normalized pointer position at one event instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub timestamp: Instant,
    /// Number of simultaneous touch points. Mouse input reports 1.
    pub touch_count: u32,
}

impl PointerSample {
    /// Single-pointer sample at `(x, y)`.
    pub fn new(x: f64, y: f64, timestamp: Instant) -> Self {
        Self { x, y, timestamp, touch_count: 1 }
    }

    pub fn with_touch_count(mut self, touch_count: u32) -> Self {
        self.touch_count = touch_count;
        self
    }

    pub fn is_multi_touch(&self) -> bool {
        self.touch_count > 1
    }
}
