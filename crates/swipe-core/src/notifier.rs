//! Notification delivery: the seam between the tracker and its subscribers.

use crate::{MoveRecord, SwipeEvent};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{trace, warn};

/// Receives named gesture events. Fire-and-forget: the tracker never observes
/// what a notifier does with an event.
pub trait Notifier {
    fn emit(&mut self, event: SwipeEvent, record: &MoveRecord);
}

impl<F> Notifier for F
where
    F: FnMut(SwipeEvent, &MoveRecord),
{
    fn emit(&mut self, event: SwipeEvent, record: &MoveRecord) {
        self(event, record)
    }
}

/// One emitted event together with its snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notification {
    pub event: SwipeEvent,
    pub record: MoveRecord,
}

/// Forwards notifications over a bounded channel so another thread can
/// consume them. Never blocks the input thread: when the channel is full or
/// the receiver is gone the notification is dropped.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(tx: Sender<Notification>) -> Self {
        Self { tx }
    }

    /// Create a notifier together with the receiving end of its channel.
    pub fn bounded(capacity: usize) -> (Self, Receiver<Notification>) {
        let (tx, rx) = bounded(capacity);
        (Self::new(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn emit(&mut self, event: SwipeEvent, record: &MoveRecord) {
        match self.tx.try_send(Notification { event, record: *record }) {
            Ok(()) => {}
            Err(TrySendError::Full(n)) => {
                warn!(event = %n.event, "Notification channel full, dropping event");
            }
            Err(TrySendError::Disconnected(n)) => {
                trace!(event = %n.event, "No receiver for notification");
            }
        }
    }
}

/// Handle returned by [`Emitter::on`] and friends, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Box<dyn FnMut(SwipeEvent, &MoveRecord)>;

struct Listener {
    id: ListenerId,
    /// `None` listens to every event.
    event: Option<SwipeEvent>,
    once: bool,
    handler: Handler,
}

impl Listener {
    fn matches(&self, event: SwipeEvent) -> bool {
        self.event.map_or(true, |e| e == event)
    }
}

/// In-process publish/subscribe registry keyed by event name.
///
/// Listeners run in registration order, synchronously inside `emit`.
#[derive(Default)]
pub struct Emitter {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one event.
    pub fn on<F>(&mut self, event: SwipeEvent, handler: F) -> ListenerId
    where
        F: FnMut(SwipeEvent, &MoveRecord) + 'static,
    {
        self.register(Some(event), false, Box::new(handler))
    }

    /// Subscribe to the next occurrence of one event only.
    pub fn once<F>(&mut self, event: SwipeEvent, handler: F) -> ListenerId
    where
        F: FnMut(SwipeEvent, &MoveRecord) + 'static,
    {
        self.register(Some(event), true, Box::new(handler))
    }

    /// Subscribe to every event.
    pub fn on_any<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(SwipeEvent, &MoveRecord) + 'static,
    {
        self.register(None, false, Box::new(handler))
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Remove every listener registered for exactly `event`.
    pub fn off_all(&mut self, event: SwipeEvent) {
        self.listeners.retain(|l| l.event != Some(event));
    }

    pub fn has_listeners(&self, event: SwipeEvent) -> bool {
        self.listeners.iter().any(|l| l.matches(event))
    }

    pub fn listener_count(&self, event: SwipeEvent) -> usize {
        self.listeners.iter().filter(|l| l.matches(event)).count()
    }

    fn register(&mut self, event: Option<SwipeEvent>, once: bool, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, event, once, handler });
        id
    }
}

impl Notifier for Emitter {
    fn emit(&mut self, event: SwipeEvent, record: &MoveRecord) {
        let mut spent = Vec::new();
        for listener in self.listeners.iter_mut().filter(|l| l.matches(event)) {
            (listener.handler)(event, record);
            if listener.once {
                spent.push(listener.id);
            }
        }
        if !spent.is_empty() {
            self.listeners.retain(|l| !spent.contains(&l.id));
        }
    }
}
