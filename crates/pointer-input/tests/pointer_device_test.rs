//! End-to-end frame behaviour of `PointerDevice` driven through an `EventHub`.

use std::rc::Rc;

use pointer_input::{
    BoundingBox, EventHub, EventName, InteractionModel, InteractionPreference, PointerButton,
    PointerConfig, PointerDevice, RawEvent, VirtualSurface, WheelScale, WheelVariant,
};

struct Harness {
    hub: Rc<EventHub>,
    device: PointerDevice,
    client: (f64, f64),
}

impl Harness {
    fn new() -> Self {
        let hub = Rc::new(EventHub::pointer());
        let device = PointerDevice::new(hub.clone());
        Self {
            hub,
            device,
            client: (0.0, 0.0),
        }
    }

    fn press(&self, button: PointerButton) {
        self.hub.emit(
            EventName::Press,
            &RawEvent::Button {
                code: button.index() as i32,
            },
        );
    }

    fn release(&self, button: PointerButton) {
        self.hub.emit(
            EventName::Release,
            &RawEvent::Button {
                code: button.index() as i32,
            },
        );
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        self.client = (self.client.0 + dx, self.client.1 + dy);
        self.hub.emit(
            EventName::Move,
            &RawEvent::Motion {
                client: self.client,
                movement: Some((dx, dy)),
            },
        );
    }

    fn wheel(&self, amount: f64) {
        self.hub.emit(
            EventName::Wheel(WheelVariant::Pixel),
            &RawEvent::Wheel { amount },
        );
    }
}

#[test]
fn press_then_hold() {
    let mut h = Harness::new();
    h.press(PointerButton::Primary);
    h.device.update();
    assert!(h.device.is_pressed(PointerButton::Primary));
    assert!(h.device.was_just_pressed(PointerButton::Primary));

    h.device.update();
    assert!(h.device.is_pressed(PointerButton::Primary));
    assert!(!h.device.was_just_pressed(PointerButton::Primary));
}

#[test]
fn move_accumulates_then_release() {
    let mut h = Harness::new();
    h.press(PointerButton::Primary);
    h.device.update();

    h.move_by(5.0, 3.0);
    h.move_by(2.0, 0.0);
    h.device.update();
    assert_eq!(h.device.delta(), (7.0, 3.0));

    h.release(PointerButton::Primary);
    h.device.update();
    assert!(!h.device.is_pressed(PointerButton::Primary));
    assert!(h.device.was_just_released(PointerButton::Primary));
    assert_eq!(h.device.delta(), (0.0, 0.0));

    h.device.update();
    assert!(!h.device.was_just_released(PointerButton::Primary));
}

#[test]
fn repeated_presses_pulse_once() {
    let mut h = Harness::new();
    h.press(PointerButton::Auxiliary);
    h.press(PointerButton::Auxiliary);
    h.device.update();
    assert!(h.device.was_just_pressed(PointerButton::Auxiliary));

    h.press(PointerButton::Auxiliary);
    h.device.update();
    assert!(!h.device.was_just_pressed(PointerButton::Auxiliary));
    assert!(h.device.is_pressed(PointerButton::Auxiliary));
}

#[test]
fn idle_tick_keeps_position_and_zeroes_pulses() {
    let mut h = Harness::new();
    h.move_by(40.0, 30.0);
    h.wheel(-120.0);
    h.hub
        .emit(EventName::DoubleActivate, &RawEvent::DoubleActivate);
    h.device.update();
    assert_eq!(h.device.position(), (40.0, 30.0));
    assert_eq!(h.device.wheel_delta(), 120.0);
    assert!(h.device.was_double_clicked());

    h.device.update();
    assert_eq!(h.device.position(), (40.0, 30.0));
    assert_eq!(h.device.delta(), (0.0, 0.0));
    assert_eq!(h.device.wheel_delta(), 0.0);
    assert!(!h.device.was_double_clicked());
}

#[test]
fn queries_are_stable_within_a_frame() {
    let mut h = Harness::new();
    h.press(PointerButton::Primary);
    h.device.update();
    let snapshot = *h.device.state();

    h.release(PointerButton::Primary);
    h.move_by(9.0, 9.0);
    h.wheel(3.0);
    assert_eq!(*h.device.state(), snapshot);
    assert!(h.device.was_just_pressed(PointerButton::Primary));
    assert!(h.device.was_just_pressed(PointerButton::Primary));
}

#[test]
fn zero_duration_tick_still_shows_edge() {
    let mut h = Harness::new();
    h.press(PointerButton::Primary);
    h.device.update();
    let first = *h.device.state();
    h.device.update();
    let second = *h.device.state();

    assert!(first.was_just_pressed(PointerButton::Primary));
    assert!(!second.was_just_pressed(PointerButton::Primary));
}

#[test]
fn surface_relative_position_with_config() {
    let hub = Rc::new(EventHub::pointer());
    let config = PointerConfig {
        wheel: WheelScale {
            pixel: -0.5,
            ..WheelScale::default()
        },
        interaction: InteractionPreference::Auto,
    };
    let mut device = PointerDevice::with_config(hub.clone(), &config);
    let surface = Rc::new(VirtualSurface::new(BoundingBox::new(
        8.0, 16.0, 320.0, 240.0,
    )));
    device.bind_surface(surface.clone());

    hub.emit(
        EventName::Move,
        &RawEvent::Motion {
            client: (18.0, 20.0),
            movement: Some((2.0, 1.0)),
        },
    );
    hub.emit(
        EventName::Wheel(WheelVariant::Pixel),
        &RawEvent::Wheel { amount: -100.0 },
    );
    surface.enter();
    device.update();

    assert_eq!(device.position(), (10.0, 4.0));
    assert_eq!(device.delta(), (2.0, 1.0));
    assert_eq!(device.wheel_delta(), 50.0);
    assert!(device.is_inside_surface());
}

#[test]
fn forced_touch_model_on_pointer_hub() {
    let hub = Rc::new(EventHub::pointer());
    let config = PointerConfig {
        interaction: InteractionPreference::Touch,
        ..PointerConfig::default()
    };
    let device = PointerDevice::with_config(hub.clone(), &config);
    assert_eq!(device.interaction_model(), InteractionModel::Touch);
    assert_eq!(hub.listener_count(EventName::Press), 0);
    assert_eq!(hub.listener_count(EventName::ContactStart), 1);
}

#[test]
fn two_devices_share_one_source() {
    let hub = Rc::new(EventHub::pointer());
    let mut a = PointerDevice::new(hub.clone());
    let mut b = PointerDevice::new(hub.clone());

    hub.emit(EventName::Press, &RawEvent::Button { code: 2 });
    a.update();
    b.update();
    assert!(a.was_just_pressed(PointerButton::Secondary));
    assert!(b.was_just_pressed(PointerButton::Secondary));

    a.dispose();
    assert_eq!(hub.listener_count(EventName::Press), 1);
    drop(b);
    assert_eq!(hub.total_listeners(), 0);
}
