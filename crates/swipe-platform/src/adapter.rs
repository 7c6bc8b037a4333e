//! Input adapter: normalizes mouse and touch events and routes them to a sink.
//!
//! Listener scope follows the usual DOM arrangement for swipe handling:
//! - presses and moves are only heard on the sink's own surface
//! - releases and touch cancellation are heard document-wide, so a gesture
//!   still closes when the pointer is released outside the surface

use crate::device::{DeviceEvent, DeviceEventKind, MouseButton, TouchPoint};
use serde::{Deserialize, Serialize};
use swipe_core::{PointerSample, PointerSink, SurfaceId};
use tracing::{debug, trace};

/// Configuration for the input adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Ignore presses/releases from anything but the left mouse button.
    pub primary_button_only: bool,
}

/// A device event reduced to what a gesture sink consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Start(PointerSample),
    Move(PointerSample),
    End(PointerSample),
    Cancel,
}

impl PointerInput {
    /// Releases and cancellations are heard outside the surface too.
    pub fn is_document_scoped(&self) -> bool {
        matches!(self, PointerInput::End(_) | PointerInput::Cancel)
    }
}

/// What the host should do with the original event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Disposition {
    /// The sink received the event.
    pub delivered: bool,
    /// Suppress the platform default (scrolling, text selection).
    pub prevent_default: bool,
    /// Keep parent surfaces from handling the event again.
    pub stop_propagation: bool,
}

impl Disposition {
    const IGNORED: Disposition = Disposition {
        delivered: false,
        prevent_default: false,
        stop_propagation: false,
    };
}

/// Counters for dispatched events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdapterStats {
    pub delivered: u64,
    pub ignored: u64,
    pub expired: u64,
}

/// Normalizes device events for one sink at a time.
#[derive(Debug, Default)]
pub struct SurfaceInput {
    config: AdapterConfig,
    stats: AdapterStats,
}

impl SurfaceInput {
    pub fn new(config: AdapterConfig) -> Self {
        Self { config, stats: AdapterStats::default() }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn stats(&self) -> AdapterStats {
        self.stats
    }

    /// Reduce a device event to a pointer input. Returns `None` for events
    /// that carry no usable pointer (empty touch lists, filtered buttons).
    pub fn normalize(&self, event: &DeviceEvent) -> Option<PointerInput> {
        let ts = event.timestamp;
        match &event.kind {
            DeviceEventKind::MouseDown { x, y, button } => self
                .accepts(*button)
                .then(|| PointerInput::Start(PointerSample::new(*x, *y, ts))),
            DeviceEventKind::MouseMove { x, y } => {
                Some(PointerInput::Move(PointerSample::new(*x, *y, ts)))
            }
            DeviceEventKind::MouseUp { x, y, button } => self
                .accepts(*button)
                .then(|| PointerInput::End(PointerSample::new(*x, *y, ts))),
            DeviceEventKind::TouchStart { touches } => {
                touch_sample(touches, ts).map(PointerInput::Start)
            }
            DeviceEventKind::TouchMove { touches } => {
                touch_sample(touches, ts).map(PointerInput::Move)
            }
            DeviceEventKind::TouchEnd { changed, .. } => {
                touch_sample(changed, ts).map(PointerInput::End)
            }
            DeviceEventKind::TouchCancel => Some(PointerInput::Cancel),
        }
    }

    /// Normalize `event` and deliver it to `sink` if the sink is listening
    /// for that phase on that surface.
    pub fn dispatch<S>(&mut self, event: &DeviceEvent, sink: &mut S) -> Disposition
    where
        S: PointerSink + ?Sized,
    {
        let Some(input) = self.normalize(event) else {
            debug!(kind = ?event.kind, "Dropping device event without a usable pointer");
            self.stats.ignored += 1;
            return Disposition::IGNORED;
        };

        if !input.is_document_scoped() && !targets(event.target, sink.surface()) {
            trace!(event_target = ?event.target, "Event outside sink surface");
            self.stats.ignored += 1;
            return Disposition::IGNORED;
        }

        if sink.expire_stale(event.timestamp) {
            self.stats.expired += 1;
        }

        let interest = sink.interest();
        let disposition = match input {
            PointerInput::Start(sample) if interest.start => {
                sink.on_pointer_start(&sample);
                Disposition { delivered: true, prevent_default: true, stop_propagation: true }
            }
            PointerInput::Move(sample) if interest.motion => {
                sink.on_pointer_move(&sample);
                // Leave multi-touch alone so the platform can pinch/zoom.
                let claimed = !sample.is_multi_touch();
                Disposition { delivered: true, prevent_default: claimed, stop_propagation: claimed }
            }
            PointerInput::End(sample) if interest.motion => {
                sink.on_pointer_end(&sample);
                Disposition { delivered: true, prevent_default: false, stop_propagation: true }
            }
            PointerInput::Cancel if interest.motion => {
                sink.on_pointer_cancel();
                Disposition { delivered: true, prevent_default: false, stop_propagation: false }
            }
            _ => Disposition::IGNORED,
        };

        if disposition.delivered {
            self.stats.delivered += 1;
        } else {
            self.stats.ignored += 1;
        }
        disposition
    }

    fn accepts(&self, button: MouseButton) -> bool {
        !self.config.primary_button_only || button == MouseButton::Left
    }
}

fn targets(target: Option<SurfaceId>, surface: SurfaceId) -> bool {
    target == Some(surface)
}

fn touch_sample(points: &[TouchPoint], timestamp: std::time::Instant) -> Option<PointerSample> {
    let first = points.first()?;
    let count = u32::try_from(points.len()).unwrap_or(u32::MAX);
    Some(PointerSample::new(first.page_x, first.page_y, timestamp).with_touch_count(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use swipe_core::{GestureTracker, MoveRecord, SwipeEvent, TrackerConfig};

    const SURFACE: SurfaceId = SurfaceId(3);

    type Log = Vec<SwipeEvent>;

    fn tracker() -> GestureTracker<LogNotifier> {
        GestureTracker::create(Some(SURFACE), LogNotifier::default()).unwrap()
    }

    fn logging_tracker(config: TrackerConfig) -> GestureTracker<LogNotifier> {
        GestureTracker::with_config(Some(SURFACE), LogNotifier::default(), config).unwrap()
    }

    #[derive(Default)]
    struct LogNotifier(Log);

    impl swipe_core::Notifier for LogNotifier {
        fn emit(&mut self, event: SwipeEvent, _: &MoveRecord) {
            self.0.push(event);
        }
    }

    struct Feed {
        base: Instant,
    }

    impl Feed {
        fn new() -> Self {
            Self { base: Instant::now() }
        }

        fn on(&self, ms: u64, target: Option<SurfaceId>, kind: DeviceEventKind) -> DeviceEvent {
            DeviceEvent::new(target, self.base + Duration::from_millis(ms), kind)
        }
    }

    fn down(x: f64, y: f64) -> DeviceEventKind {
        DeviceEventKind::MouseDown { x, y, button: MouseButton::Left }
    }

    fn up(x: f64, y: f64) -> DeviceEventKind {
        DeviceEventKind::MouseUp { x, y, button: MouseButton::Left }
    }

    #[test]
    fn test_normalize_mouse() {
        let feed = Feed::new();
        let input = SurfaceInput::default();

        let Some(PointerInput::Start(sample)) =
            input.normalize(&feed.on(0, Some(SURFACE), down(4.0, 5.0)))
        else {
            panic!("expected start");
        };
        assert_eq!((sample.x, sample.y, sample.touch_count), (4.0, 5.0, 1));
    }

    #[test]
    fn test_normalize_touch_uses_first_and_changed() {
        let feed = Feed::new();
        let input = SurfaceInput::default();

        let touches = vec![TouchPoint::new(1, 10.0, 20.0), TouchPoint::new(2, 90.0, 90.0)];
        let Some(PointerInput::Move(sample)) =
            input.normalize(&feed.on(0, Some(SURFACE), DeviceEventKind::TouchMove { touches }))
        else {
            panic!("expected move");
        };
        assert_eq!((sample.x, sample.y, sample.touch_count), (10.0, 20.0, 2));

        let end = DeviceEventKind::TouchEnd {
            touches: vec![],
            changed: vec![TouchPoint::new(1, 30.0, 40.0)],
        };
        let Some(PointerInput::End(sample)) = input.normalize(&feed.on(5, None, end)) else {
            panic!("expected end");
        };
        assert_eq!((sample.x, sample.y), (30.0, 40.0));
    }

    #[test]
    fn test_empty_touch_list_is_dropped() {
        let feed = Feed::new();
        let mut input = SurfaceInput::default();
        let mut t = tracker();

        let event = feed.on(0, Some(SURFACE), DeviceEventKind::TouchStart { touches: vec![] });
        assert_eq!(input.normalize(&event), None);
        assert_eq!(input.dispatch(&event, &mut t), Disposition::IGNORED);
        assert!(!t.is_active());
        assert_eq!(input.stats().ignored, 1);
    }

    #[test]
    fn test_primary_button_filter() {
        let feed = Feed::new();
        let input = SurfaceInput::new(AdapterConfig { primary_button_only: true });
        let right = DeviceEventKind::MouseDown { x: 0.0, y: 0.0, button: MouseButton::Right };
        assert_eq!(input.normalize(&feed.on(0, Some(SURFACE), right.clone())), None);

        let lenient = SurfaceInput::default();
        assert!(lenient.normalize(&feed.on(0, Some(SURFACE), right)).is_some());
    }

    #[test]
    fn test_press_elsewhere_is_not_heard() {
        let feed = Feed::new();
        let mut input = SurfaceInput::default();
        let mut t = tracker();

        let d = input.dispatch(&feed.on(0, Some(SurfaceId(99)), down(0.0, 0.0)), &mut t);
        assert!(!d.delivered);
        let d = input.dispatch(&feed.on(0, None, down(0.0, 0.0)), &mut t);
        assert!(!d.delivered);
        assert!(!t.is_active());
    }

    #[test]
    fn test_release_outside_surface_closes_gesture() {
        let feed = Feed::new();
        let mut input = SurfaceInput::default();
        let mut t = logging_tracker(TrackerConfig::default());

        input.dispatch(&feed.on(0, Some(SURFACE), down(0.0, 0.0)), &mut t);
        let d = input.dispatch(&feed.on(80, None, up(-30.0, 0.0)), &mut t);

        assert_eq!(
            d,
            Disposition { delivered: true, prevent_default: false, stop_propagation: true }
        );
        assert_eq!(
            t.notifier().0,
            vec![SwipeEvent::SwipeStart, SwipeEvent::SwipeEnd, SwipeEvent::SwipeLeft]
        );
    }

    #[test]
    fn test_moves_only_after_press() {
        let feed = Feed::new();
        let mut input = SurfaceInput::default();
        let mut t = tracker();

        let hover = feed.on(0, Some(SURFACE), DeviceEventKind::MouseMove { x: 1.0, y: 1.0 });
        assert_eq!(input.dispatch(&hover, &mut t), Disposition::IGNORED);

        let press = input.dispatch(&feed.on(5, Some(SURFACE), down(1.0, 1.0)), &mut t);
        assert_eq!(
            press,
            Disposition { delivered: true, prevent_default: true, stop_propagation: true }
        );

        let drag = feed.on(10, Some(SURFACE), DeviceEventKind::MouseMove { x: 4.0, y: 1.0 });
        let d = input.dispatch(&drag, &mut t);
        assert!(d.delivered && d.prevent_default && d.stop_propagation);
        assert_eq!(t.state().delta(), (3.0, 0.0));
        assert_eq!(input.stats().delivered, 2);
    }

    #[test]
    fn test_multi_touch_move_is_not_claimed() {
        let feed = Feed::new();
        let mut input = SurfaceInput::default();
        let mut t = tracker();

        let start = DeviceEventKind::TouchStart { touches: vec![TouchPoint::new(1, 0.0, 0.0)] };
        input.dispatch(&feed.on(0, Some(SURFACE), start), &mut t);

        let pinch = DeviceEventKind::TouchMove {
            touches: vec![TouchPoint::new(1, 10.0, 0.0), TouchPoint::new(2, 50.0, 50.0)],
        };
        let d = input.dispatch(&feed.on(10, Some(SURFACE), pinch), &mut t);
        assert_eq!(
            d,
            Disposition { delivered: true, prevent_default: false, stop_propagation: false }
        );
        assert_eq!(t.state().delta(), (0.0, 0.0));
        assert!(t.is_active());
    }

    #[test]
    fn test_touch_cancel_abandons_gesture() {
        let feed = Feed::new();
        let mut input = SurfaceInput::default();
        let mut t = logging_tracker(TrackerConfig::default());

        let start = DeviceEventKind::TouchStart { touches: vec![TouchPoint::new(1, 0.0, 0.0)] };
        input.dispatch(&feed.on(0, Some(SURFACE), start), &mut t);
        let d = input.dispatch(&feed.on(10, None, DeviceEventKind::TouchCancel), &mut t);
        assert!(d.delivered);

        let end = DeviceEventKind::TouchEnd {
            touches: vec![],
            changed: vec![TouchPoint::new(1, 80.0, 0.0)],
        };
        let d = input.dispatch(&feed.on(20, None, end), &mut t);
        assert!(!d.delivered);
        assert_eq!(t.notifier().0, vec![SwipeEvent::SwipeStart]);
    }

    #[test]
    fn test_stale_gesture_expires_before_release() {
        let feed = Feed::new();
        let mut input = SurfaceInput::default();
        let config = TrackerConfig { gesture_timeout_ms: Some(500), ..TrackerConfig::default() };
        let mut t = logging_tracker(config);

        input.dispatch(&feed.on(0, Some(SURFACE), down(0.0, 0.0)), &mut t);
        let d = input.dispatch(&feed.on(2000, None, up(100.0, 0.0)), &mut t);

        assert!(!d.delivered);
        assert_eq!(input.stats().expired, 1);
        assert_eq!(t.notifier().0, vec![SwipeEvent::SwipeStart]);
    }

    #[test]
    fn test_torn_down_tracker_hears_nothing() {
        let feed = Feed::new();
        let mut input = SurfaceInput::default();
        let mut t = tracker();
        t.teardown();

        let d = input.dispatch(&feed.on(0, Some(SURFACE), down(0.0, 0.0)), &mut t);
        assert!(!d.delivered);
        assert!(!t.is_active());
    }
}
