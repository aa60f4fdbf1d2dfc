//! Event source abstraction and an in-memory implementation.
//!
//! Platforms push named events into subscribed callbacks. Everything runs on a
//! single thread: a callback runs to completion before any other callback or
//! `PointerDevice::update()` can observe its writes.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::event::{EventName, RawEvent, WheelVariant};

/// Callback invoked for every delivered event of the subscribed name.
pub type Callback = Box<dyn FnMut(&RawEvent)>;

/// Handle returned by [`EventSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Platform abstraction for asynchronous event delivery.
pub trait EventSource {
    /// Returns `true` if the platform can deliver `name` at all.
    fn supports(&self, name: EventName) -> bool;

    /// Register `callback` for `name`.
    fn subscribe(&self, name: EventName, callback: Callback) -> SubscriptionId;

    /// Remove a subscription. Returns `false` if it was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

struct Listener {
    id: SubscriptionId,
    name: EventName,
    callback: Callback,
}

/// Single-threaded event hub with a fixed capability set.
///
/// Used directly in tests and wrapped by platform adapters, which translate
/// native events and forward them through [`EventHub::emit`]. Subscribing or
/// unsubscribing from inside a callback of the same hub panics.
pub struct EventHub {
    capabilities: HashSet<EventName>,
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
}

impl EventHub {
    pub fn new(capabilities: impl IntoIterator<Item = EventName>) -> Self {
        Self {
            capabilities: capabilities.into_iter().collect(),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    /// Hub advertising the mouse-style pointer events with pixel wheel deltas.
    pub fn pointer() -> Self {
        Self::new([
            EventName::Wheel(WheelVariant::Pixel),
            EventName::Press,
            EventName::Release,
            EventName::Move,
            EventName::DoubleActivate,
            EventName::Enter,
            EventName::Leave,
        ])
    }

    /// Hub advertising touch contact events with pixel wheel deltas.
    pub fn touch() -> Self {
        Self::new([
            EventName::Wheel(WheelVariant::Pixel),
            EventName::ContactStart,
            EventName::ContactMove,
            EventName::ContactEnd,
            EventName::DoubleActivate,
            EventName::Enter,
            EventName::Leave,
        ])
    }

    /// Deliver `event` to every callback subscribed to `name`.
    /// Returns the number of callbacks invoked.
    pub fn emit(&self, name: EventName, event: &RawEvent) -> usize {
        let mut listeners = self.listeners.borrow_mut();
        let mut delivered = 0;
        for listener in listeners.iter_mut().filter(|l| l.name == name) {
            (listener.callback)(event);
            delivered += 1;
        }
        delivered
    }

    /// Number of live subscriptions for `name`.
    pub fn listener_count(&self, name: EventName) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.name == name)
            .count()
    }

    /// Total number of live subscriptions.
    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl EventSource for EventHub {
    fn supports(&self, name: EventName) -> bool {
        self.capabilities.contains(&name)
    }

    fn subscribe(&self, name: EventName, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.get());
        self.next_id.set(id.raw() + 1);
        self.listeners.borrow_mut().push(Listener { id, name, callback });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }
}
