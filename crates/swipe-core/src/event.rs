//! Named notifications emitted by the tracker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Events a tracker emits, in the order they can occur for one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeEvent {
    /// A gesture was opened by a pointer press.
    SwipeStart,
    /// The pointer moved while a gesture is open.
    Move,
    /// The gesture was closed by a pointer release.
    SwipeEnd,
    SwipeLeft,
    SwipeRight,
    SwipeUp,
    SwipeDown,
}

impl SwipeEvent {
    pub const ALL: [SwipeEvent; 7] = [
        SwipeEvent::SwipeStart,
        SwipeEvent::Move,
        SwipeEvent::SwipeEnd,
        SwipeEvent::SwipeLeft,
        SwipeEvent::SwipeRight,
        SwipeEvent::SwipeUp,
        SwipeEvent::SwipeDown,
    ];

    /// Name used by subscribers.
    pub fn name(self) -> &'static str {
        match self {
            SwipeEvent::SwipeStart => "swipestart",
            SwipeEvent::Move => "move",
            SwipeEvent::SwipeEnd => "swipeend",
            SwipeEvent::SwipeLeft => "swipeleft",
            SwipeEvent::SwipeRight => "swiperight",
            SwipeEvent::SwipeUp => "swipeup",
            SwipeEvent::SwipeDown => "swipedown",
        }
    }

    /// Directional events carry the direction they report.
    pub fn direction(self) -> Option<SwipeDirection> {
        match self {
            SwipeEvent::SwipeLeft => Some(SwipeDirection::Left),
            SwipeEvent::SwipeRight => Some(SwipeDirection::Right),
            SwipeEvent::SwipeUp => Some(SwipeDirection::Up),
            SwipeEvent::SwipeDown => Some(SwipeDirection::Down),
            _ => None,
        }
    }
}

impl fmt::Display for SwipeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown swipe event name: {0}")]
pub struct UnknownEventName(pub String);

impl FromStr for SwipeEvent {
    type Err = UnknownEventName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SwipeEvent::ALL
            .into_iter()
            .find(|event| event.name() == s)
            .ok_or_else(|| UnknownEventName(s.to_string()))
    }
}

/// Direction of a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Classify final displacement, each axis on its own.
    ///
    /// Returns `[horizontal, vertical]`. An axis yields a direction only when
    /// its absolute delta is strictly greater than `threshold`; negative deltas
    /// mean left/up in screen coordinates.
    pub fn classify(dx: f64, dy: f64, threshold: f64) -> [Option<SwipeDirection>; 2] {
        let horizontal = (dx.abs() > threshold).then(|| {
            if dx < 0.0 {
                SwipeDirection::Left
            } else {
                SwipeDirection::Right
            }
        });
        let vertical = (dy.abs() > threshold).then(|| {
            if dy < 0.0 {
                SwipeDirection::Up
            } else {
                SwipeDirection::Down
            }
        });
        [horizontal, vertical]
    }

    pub fn event(self) -> SwipeEvent {
        match self {
            SwipeDirection::Left => SwipeEvent::SwipeLeft,
            SwipeDirection::Right => SwipeEvent::SwipeRight,
            SwipeDirection::Up => SwipeEvent::SwipeUp,
            SwipeDirection::Down => SwipeEvent::SwipeDown,
        }
    }
}
