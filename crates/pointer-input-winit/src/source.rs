//! Translation of winit window/device events into pointer events.

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

use log::trace;
use pointer_input::{
    Callback, EventHub, EventName, EventSource, PointerButton, RawEvent, SubscriptionId,
    WheelVariant,
};
use serde::{Deserialize, Serialize};
use winit::event::{
    DeviceEvent, ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent,
};

/// Adapter settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WinitSourceConfig {
    /// Advertise touch contact events instead of the mouse model.
    pub touch: bool,
    /// Pixels per scrolled line for `MouseScrollDelta::LineDelta`.
    pub line_height: f64,
    /// Maximum time between two primary presses of a double click.
    pub double_click_interval_ms: u64,
    /// Maximum distance between two primary presses of a double click.
    pub double_click_distance: f64,
}

impl Default for WinitSourceConfig {
    fn default() -> Self {
        Self {
            touch: false,
            line_height: 30.0,
            double_click_interval_ms: 500,
            double_click_distance: 4.0,
        }
    }
}

/// Synthesizes double clicks from primary presses; winit has no such event.
#[derive(Debug)]
pub struct DoubleClickDetector {
    interval: Duration,
    distance: f64,
    last_press: Option<(Instant, (f64, f64))>,
}

impl DoubleClickDetector {
    pub fn new(interval: Duration, distance: f64) -> Self {
        Self {
            interval,
            distance,
            last_press: None,
        }
    }

    /// Record a primary press. Returns `true` when it completes a double click;
    /// the press after a double click starts a new sequence.
    pub fn press(&mut self, at: Instant, position: (f64, f64)) -> bool {
        if let Some((last_at, last_pos)) = self.last_press {
            let dx = position.0 - last_pos.0;
            let dy = position.1 - last_pos.1;
            if at.saturating_duration_since(last_at) <= self.interval
                && (dx * dx + dy * dy).sqrt() <= self.distance
            {
                self.last_press = None;
                return true;
            }
        }
        self.last_press = Some((at, position));
        false
    }
}

/// Map a winit mouse button to a platform button code.
pub fn button_code(button: MouseButton) -> Option<i32> {
    let button = match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Middle => PointerButton::Auxiliary,
        MouseButton::Right => PointerButton::Secondary,
        _ => return None,
    };
    Some(button.index() as i32)
}

/// Convert a winit scroll delta into pixel units, positive toward the user.
///
/// winit reports positive values when content should move down, i.e. when
/// the wheel turns away from the user.
pub fn wheel_pixels(delta: MouseScrollDelta, line_height: f64) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -f64::from(y) * line_height,
        MouseScrollDelta::PixelDelta(position) => -position.y,
    }
}

/// [`EventSource`] fed from a winit event loop.
///
/// The application forwards every `WindowEvent` and `DeviceEvent` it receives;
/// subscribed callbacks run synchronously inside those calls.
pub struct WinitEventSource {
    hub: EventHub,
    config: WinitSourceConfig,
    client: Cell<(f64, f64)>,
    relative_motion: Cell<bool>,
    active_touch: Cell<Option<u64>>,
    double_click: RefCell<DoubleClickDetector>,
}

impl WinitEventSource {
    pub fn new(config: WinitSourceConfig) -> Self {
        let mut capabilities = vec![
            EventName::Wheel(WheelVariant::Pixel),
            EventName::Press,
            EventName::Release,
            EventName::Move,
            EventName::DoubleActivate,
        ];
        if config.touch {
            capabilities.extend([
                EventName::ContactStart,
                EventName::ContactMove,
                EventName::ContactEnd,
            ]);
        }
        let detector = DoubleClickDetector::new(
            Duration::from_millis(config.double_click_interval_ms),
            config.double_click_distance,
        );
        Self {
            hub: EventHub::new(capabilities),
            config,
            client: Cell::new((0.0, 0.0)),
            relative_motion: Cell::new(false),
            active_touch: Cell::new(None),
            double_click: RefCell::new(detector),
        }
    }

    /// Take motion from raw device deltas instead of cursor positions.
    /// Use while the pointer is locked, when the cursor stops moving.
    pub fn set_relative_motion(&self, enabled: bool) {
        self.relative_motion.set(enabled);
    }

    pub fn relative_motion(&self) -> bool {
        self.relative_motion.get()
    }

    /// Translate a window event. Returns `true` if it was a pointer event.
    pub fn handle_window_event(&self, event: &WindowEvent) -> bool {
        self.handle_window_event_at(event, Instant::now())
    }

    /// Same as [`handle_window_event`](Self::handle_window_event) with an
    /// explicit timestamp for double-click detection.
    pub fn handle_window_event_at(&self, event: &WindowEvent, now: Instant) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let client = (position.x, position.y);
                self.client.set(client);
                if !self.relative_motion.get() {
                    self.hub.emit(
                        EventName::Move,
                        &RawEvent::Motion {
                            client,
                            movement: None,
                        },
                    );
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(code) = button_code(*button) else {
                    trace!("ignoring mouse button {button:?}");
                    return false;
                };
                match state {
                    ElementState::Pressed => {
                        self.hub.emit(EventName::Press, &RawEvent::Button { code });
                        if *button == MouseButton::Left {
                            self.primary_pressed(now, self.client.get());
                        }
                    }
                    ElementState::Released => {
                        self.hub.emit(EventName::Release, &RawEvent::Button { code });
                    }
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = wheel_pixels(*delta, self.config.line_height);
                self.hub.emit(
                    EventName::Wheel(WheelVariant::Pixel),
                    &RawEvent::Wheel { amount },
                );
                true
            }
            WindowEvent::Touch(touch) => self.handle_touch(touch, now),
            _ => false,
        }
    }

    /// Translate a device event. Only raw mouse motion is used, and only in
    /// relative mode.
    pub fn handle_device_event(&self, event: &DeviceEvent) -> bool {
        match event {
            DeviceEvent::MouseMotion { delta } if self.relative_motion.get() => {
                self.hub.emit(
                    EventName::Move,
                    &RawEvent::Motion {
                        client: self.client.get(),
                        movement: Some(*delta),
                    },
                );
                true
            }
            _ => false,
        }
    }

    fn handle_touch(&self, touch: &Touch, now: Instant) -> bool {
        let client = (touch.location.x, touch.location.y);
        match touch.phase {
            TouchPhase::Started => {
                if self.active_touch.get().is_some() {
                    return false;
                }
                self.active_touch.set(Some(touch.id));
                self.client.set(client);
                self.hub.emit(
                    EventName::ContactStart,
                    &RawEvent::Contact {
                        client: Some(client),
                    },
                );
                self.primary_pressed(now, client);
                true
            }
            TouchPhase::Moved if self.active_touch.get() == Some(touch.id) => {
                self.client.set(client);
                self.hub.emit(
                    EventName::ContactMove,
                    &RawEvent::Contact {
                        client: Some(client),
                    },
                );
                true
            }
            TouchPhase::Ended | TouchPhase::Cancelled
                if self.active_touch.get() == Some(touch.id) =>
            {
                self.active_touch.set(None);
                self.hub
                    .emit(EventName::ContactEnd, &RawEvent::Contact { client: None });
                true
            }
            _ => false,
        }
    }

    fn primary_pressed(&self, now: Instant, position: (f64, f64)) {
        let completed = self.double_click.borrow_mut().press(now, position);
        if completed {
            self.hub
                .emit(EventName::DoubleActivate, &RawEvent::DoubleActivate);
        }
    }
}

impl Default for WinitEventSource {
    fn default() -> Self {
        Self::new(WinitSourceConfig::default())
    }
}

impl EventSource for WinitEventSource {
    fn supports(&self, name: EventName) -> bool {
        self.hub.supports(name)
    }

    fn subscribe(&self, name: EventName, callback: Callback) -> SubscriptionId {
        self.hub.subscribe(name, callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.hub.unsubscribe(id)
    }
}
