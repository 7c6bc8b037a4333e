//! Raw device events as delivered by the host before normalization.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use swipe_core::SurfaceId;

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
    Unknown,
}

/// One finger on a touch surface, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    #[serde(default)]
    pub id: i64,
    pub page_x: f64,
    pub page_y: f64,
}

impl TouchPoint {
    pub fn new(id: i64, page_x: f64, page_y: f64) -> Self {
        Self { id, page_x, page_y }
    }
}

/// Types of device events the adapter understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceEventKind {
    MouseDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    MouseMove { x: f64, y: f64 },
    MouseUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    /// `touches` holds every finger currently down.
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    /// `touches` holds the fingers still down, `changed` the ones just lifted.
    TouchEnd {
        #[serde(default)]
        touches: Vec<TouchPoint>,
        changed: Vec<TouchPoint>,
    },
    TouchCancel,
}

/// A raw device event.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceEvent {
    /// Surface the event was dispatched on. `None` means outside every surface.
    pub target: Option<SurfaceId>,
    pub timestamp: Instant,
    pub kind: DeviceEventKind,
}

impl DeviceEvent {
    pub fn new(target: Option<SurfaceId>, timestamp: Instant, kind: DeviceEventKind) -> Self {
        Self { target, timestamp, kind }
    }

    pub fn is_touch(&self) -> bool {
        matches!(
            self.kind,
            DeviceEventKind::TouchStart { .. }
                | DeviceEventKind::TouchMove { .. }
                | DeviceEventKind::TouchEnd { .. }
                | DeviceEventKind::TouchCancel
        )
    }
}
