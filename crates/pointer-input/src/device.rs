//! Frame-synchronous pointer device.
//!
//! Callbacks registered on the event source write into a private staging
//! buffer whenever the platform delivers events. [`PointerDevice::update`]
//! reconciles staging into the public [`PointerState`] once per frame; all
//! queries read the public state only, so they are stable for the whole frame.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, trace};

use crate::button::PointerButton;
use crate::config::PointerConfig;
use crate::event::{EventName, RawEvent, WheelVariant};
use crate::key_state::{KeyAction, KeyState};
use crate::negotiate::{InteractionModel, negotiate_model, negotiate_wheel};
use crate::source::{EventSource, SubscriptionId};
use crate::surface::{CaptureNegotiator, Surface};

/// Public per-frame snapshot of the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    keys: [KeyState; PointerButton::COUNT],
    position: (f64, f64),
    delta: (f64, f64),
    wheel: f64,
    double_clicked: bool,
}

impl PointerState {
    pub fn key(&self, button: PointerButton) -> KeyState {
        self.keys[button.index()]
    }

    pub fn is_pressed(&self, button: PointerButton) -> bool {
        self.keys[button.index()].pressed
    }

    pub fn was_just_pressed(&self, button: PointerButton) -> bool {
        self.keys[button.index()].just_pressed
    }

    pub fn was_just_released(&self, button: PointerButton) -> bool {
        self.keys[button.index()].just_released
    }

    pub fn was_double_clicked(&self) -> bool {
        self.double_clicked
    }

    /// Latest position, relative to the bound surface if any.
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Motion since the previous frame.
    pub fn delta(&self) -> (f64, f64) {
        self.delta
    }

    /// Wheel movement since the previous frame, positive away from the user.
    pub fn wheel_delta(&self) -> f64 {
        self.wheel
    }
}

/// Staging buffer written by event callbacks.
#[derive(Default)]
struct Staging {
    keys: [KeyState; PointerButton::COUNT],
    position: (f64, f64),
    delta: (f64, f64),
    position_updated: bool,
    wheel: f64,
    wheel_updated: bool,
    double_clicked: bool,
    /// Previous raw client position, for platforms without relative motion.
    last_client: Option<(f64, f64)>,
    /// Previous raw contact sample (touch model).
    last_contact: (f64, f64),
    surface: Option<Rc<dyn Surface>>,
}

impl Staging {
    fn update_key(&mut self, code: i32, action: KeyAction) {
        match PointerButton::from_code(code) {
            Some(button) => self.keys[button.index()].update(action),
            None => trace!("ignoring pointer button code {code}"),
        }
    }

    fn update_position(&mut self, client: (f64, f64), movement: (f64, f64)) {
        self.position = match &self.surface {
            Some(surface) => surface.bounding_box().to_local(client),
            None => client,
        };
        self.delta.0 += movement.0;
        self.delta.1 += movement.1;
        self.position_updated = true;
    }

    fn on_wheel(&mut self, raw: &RawEvent, factor: f64) {
        match raw {
            RawEvent::Wheel { amount } => {
                self.wheel = amount * factor;
                self.wheel_updated = true;
            }
            other => trace!("unexpected wheel payload {other:?}"),
        }
    }

    fn on_button(&mut self, raw: &RawEvent, action: KeyAction) {
        match raw {
            RawEvent::Button { code } => self.update_key(*code, action),
            other => trace!("unexpected button payload {other:?}"),
        }
    }

    fn on_move(&mut self, raw: &RawEvent) {
        match *raw {
            RawEvent::Motion { client, movement } => {
                let movement = movement.unwrap_or_else(|| match self.last_client {
                    Some(last) => (client.0 - last.0, client.1 - last.1),
                    None => (0.0, 0.0),
                });
                self.last_client = Some(client);
                self.update_position(client, movement);
            }
            ref other => trace!("unexpected motion payload {other:?}"),
        }
    }

    fn on_contact_start(&mut self, raw: &RawEvent) {
        if let RawEvent::Contact {
            client: Some(client),
        } = *raw
        {
            self.last_contact = client;
            self.update_position(client, (0.0, 0.0));
        }
        self.update_key(PointerButton::Primary.index() as i32, KeyAction::Press);
    }

    fn on_contact_move(&mut self, raw: &RawEvent) {
        match *raw {
            RawEvent::Contact {
                client: Some(client),
            } => {
                let last = self.last_contact;
                self.update_position(client, (client.0 - last.0, client.1 - last.1));
                self.last_contact = client;
            }
            ref other => trace!("unexpected contact payload {other:?}"),
        }
    }
}

/// A `(source, event, id)` record kept for teardown.
struct Subscription {
    source: Rc<dyn EventSource>,
    event: EventName,
    id: SubscriptionId,
}

impl Subscription {
    fn cancel(self) {
        if !self.source.unsubscribe(self.id) {
            trace!("subscription for {:?} was already gone", self.event);
        }
    }
}

/// Pointer device reconciling asynchronous events into per-frame state.
///
/// Call [`update`](Self::update) exactly once per frame, before reading.
pub struct PointerDevice {
    staging: Rc<RefCell<Staging>>,
    state: PointerState,
    surface: Option<Rc<dyn Surface>>,
    subscriptions: Vec<Subscription>,
    surface_subscriptions: Vec<Subscription>,
    capture: CaptureNegotiator,
    wheel_variant: WheelVariant,
    model: InteractionModel,
    disposed: bool,
}

impl PointerDevice {
    /// Create a device with the default configuration.
    pub fn new(source: Rc<dyn EventSource>) -> Self {
        Self::with_config(source, &PointerConfig::default())
    }

    /// Create a device, negotiate capabilities and subscribe to `source`.
    pub fn with_config(source: Rc<dyn EventSource>, config: &PointerConfig) -> Self {
        let wheel_variant = negotiate_wheel(source.as_ref());
        let model = negotiate_model(source.as_ref(), config.interaction);
        debug!("pointer device negotiated wheel={wheel_variant:?} model={model:?}");

        let mut device = Self {
            staging: Rc::new(RefCell::new(Staging::default())),
            state: PointerState::default(),
            surface: None,
            subscriptions: Vec::new(),
            surface_subscriptions: Vec::new(),
            capture: CaptureNegotiator::new(),
            wheel_variant,
            model,
            disposed: false,
        };

        let factor = config.wheel.factor(wheel_variant);
        device.listen(&source, EventName::Wheel(wheel_variant), move |s, raw| {
            s.on_wheel(raw, factor)
        });

        match model {
            InteractionModel::Touch => {
                device.listen(&source, EventName::ContactStart, |s, raw| {
                    s.on_contact_start(raw)
                });
                device.listen(&source, EventName::ContactMove, |s, raw| {
                    s.on_contact_move(raw)
                });
                device.listen(&source, EventName::ContactEnd, |s, _| {
                    s.update_key(PointerButton::Primary.index() as i32, KeyAction::Release)
                });
            }
            InteractionModel::Pointer => {
                device.listen(&source, EventName::Move, |s, raw| s.on_move(raw));
                device.listen(&source, EventName::Press, |s, raw| {
                    s.on_button(raw, KeyAction::Press)
                });
                device.listen(&source, EventName::Release, |s, raw| {
                    s.on_button(raw, KeyAction::Release)
                });
            }
        }

        device.listen(&source, EventName::DoubleActivate, |s, _| {
            s.double_clicked = true
        });

        device
    }

    fn listen<F>(&mut self, source: &Rc<dyn EventSource>, event: EventName, mut handler: F)
    where
        F: FnMut(&mut Staging, &RawEvent) + 'static,
    {
        let staging: Weak<RefCell<Staging>> = Rc::downgrade(&self.staging);
        let id = source.subscribe(
            event,
            Box::new(move |raw: &RawEvent| {
                if let Some(staging) = staging.upgrade() {
                    handler(&mut staging.borrow_mut(), raw);
                }
            }),
        );
        self.subscriptions.push(Subscription {
            source: Rc::clone(source),
            event,
            id,
        });
    }

    /// Report coordinates relative to `surface` and track enter/leave on it.
    ///
    /// Replaces any previously bound surface.
    ///
    /// # Panics
    ///
    /// Panics if the device was disposed.
    pub fn bind_surface<S: Surface + 'static>(&mut self, surface: Rc<S>) {
        assert!(!self.disposed, "bind_surface on a disposed PointerDevice");

        for sub in self.surface_subscriptions.drain(..) {
            sub.cancel();
        }
        self.capture.reset();

        let source: Rc<dyn EventSource> = surface.clone();
        for (event, inside) in [(EventName::Enter, true), (EventName::Leave, false)] {
            let weak = Rc::downgrade(&surface);
            let id = source.subscribe(
                event,
                Box::new(move |_: &RawEvent| {
                    if let Some(surface) = weak.upgrade() {
                        surface.set_pointer_inside(inside);
                    }
                }),
            );
            self.surface_subscriptions.push(Subscription {
                source: Rc::clone(&source),
                event,
                id,
            });
        }

        let surface: Rc<dyn Surface> = surface;
        self.staging.borrow_mut().surface = Some(Rc::clone(&surface));
        self.surface = Some(surface);
        debug!("pointer device bound to surface");
    }

    /// Whether the pointer is inside the bound surface. `false` when unbound.
    pub fn is_inside_surface(&self) -> bool {
        self.surface
            .as_ref()
            .is_some_and(|surface| surface.pointer_inside())
    }

    /// Request or release exclusive pointer capture on the bound surface.
    ///
    /// Best effort: failures are logged, never reported. No-op when unbound.
    ///
    /// # Panics
    ///
    /// Panics if the device was disposed.
    pub fn set_capture(&mut self, enabled: bool) {
        assert!(!self.disposed, "set_capture on a disposed PointerDevice");
        let Some(surface) = self.surface.as_deref() else {
            return;
        };
        if enabled {
            self.capture.acquire(surface);
        } else {
            self.capture.release(surface);
        }
    }

    /// Reconcile staged events into the public state. Call once per frame.
    ///
    /// Does nothing after [`dispose`](Self::dispose).
    pub fn update(&mut self) {
        if self.disposed {
            return;
        }
        let mut staging = self.staging.borrow_mut();

        for (staged, public) in staging.keys.iter_mut().zip(self.state.keys.iter_mut()) {
            *public = staged.publish(public.pressed);
        }

        if staging.wheel_updated {
            self.state.wheel = staging.wheel;
            staging.wheel_updated = false;
        } else {
            self.state.wheel = 0.0;
        }

        self.state.double_clicked = std::mem::take(&mut staging.double_clicked);

        if staging.position_updated {
            self.state.delta = std::mem::take(&mut staging.delta);
            self.state.position = staging.position;
            staging.position_updated = false;
        } else {
            self.state.delta = (0.0, 0.0);
        }
    }

    /// Unsubscribe from every source. The public state stays frozen.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let count = self.subscriptions.len() + self.surface_subscriptions.len();
        for sub in self
            .subscriptions
            .drain(..)
            .chain(self.surface_subscriptions.drain(..))
        {
            sub.cancel();
        }
        self.disposed = true;
        debug!("pointer device disposed ({count} subscriptions removed)");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn wheel_variant(&self) -> WheelVariant {
        self.wheel_variant
    }

    pub fn interaction_model(&self) -> InteractionModel {
        self.model
    }

    /// The public snapshot of the current frame.
    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn key_state(&self, button: PointerButton) -> KeyState {
        self.state.key(button)
    }

    pub fn is_pressed(&self, button: PointerButton) -> bool {
        self.state.is_pressed(button)
    }

    pub fn was_just_pressed(&self, button: PointerButton) -> bool {
        self.state.was_just_pressed(button)
    }

    pub fn was_just_released(&self, button: PointerButton) -> bool {
        self.state.was_just_released(button)
    }

    pub fn was_double_clicked(&self) -> bool {
        self.state.was_double_clicked()
    }

    pub fn position(&self) -> (f64, f64) {
        self.state.position()
    }

    pub fn delta(&self) -> (f64, f64) {
        self.state.delta()
    }

    pub fn wheel_delta(&self) -> f64 {
        self.state.wheel_delta()
    }
}

impl Drop for PointerDevice {
    fn drop(&mut self) {
        self.dispose();
    }
}
