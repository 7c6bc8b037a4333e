//! JSON line rendering of emitted notifications.

use serde::Serialize;
use swipe_core::{Notification, SwipeEvent};

/// One printed notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputLine {
    pub event: SwipeEvent,
    pub start_x: f64,
    pub start_y: f64,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt_ms: Option<u64>,
}

impl From<&Notification> for OutputLine {
    fn from(n: &Notification) -> Self {
        let r = &n.record;
        Self {
            event: n.event,
            start_x: r.start_x,
            start_y: r.start_y,
            x: r.x,
            y: r.y,
            dx: r.dx,
            dy: r.dy,
            dt_ms: r.dt_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use swipe_core::MoveRecord;

    #[test]
    fn test_start_line_omits_duration() {
        let n = Notification {
            event: SwipeEvent::SwipeStart,
            record: MoveRecord::starting_at(1.0, 2.0, Instant::now()),
        };
        let json = serde_json::to_string(&OutputLine::from(&n)).unwrap();
        assert_eq!(
            json,
            r#"{"event":"swipestart","start_x":1.0,"start_y":2.0,"x":1.0,"y":2.0,"dx":0.0,"dy":0.0}"#
        );
    }
}
