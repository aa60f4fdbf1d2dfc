//! Property tests for the staging/public reconciliation.

use std::rc::Rc;

use pointer_input::{EventHub, EventName, PointerButton, PointerDevice, RawEvent, WheelVariant};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Press(usize),
    Release(usize),
    Move(i16, i16),
    Wheel(i16),
    DoubleClick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..PointerButton::COUNT).prop_map(Op::Press),
        (0..PointerButton::COUNT).prop_map(Op::Release),
        (-50i16..50, -50i16..50).prop_map(|(x, y)| Op::Move(x, y)),
        (-5i16..5).prop_map(Op::Wheel),
        Just(Op::DoubleClick),
    ]
}

fn ticks() -> impl Strategy<Value = Vec<Vec<Op>>> {
    prop::collection::vec(prop::collection::vec(op(), 0..8), 1..24)
}

/// Raw-side model of what the platform reported during one tick.
#[derive(Default)]
struct TickModel {
    delta: (f64, f64),
    moved: bool,
    wheel: Option<f64>,
    double_clicked: bool,
}

struct Driver {
    hub: Rc<EventHub>,
    device: PointerDevice,
    raw_pressed: [bool; PointerButton::COUNT],
    client: (f64, f64),
}

impl Driver {
    fn new() -> Self {
        let hub = Rc::new(EventHub::pointer());
        let device = PointerDevice::new(hub.clone());
        Self {
            hub,
            device,
            raw_pressed: [false; PointerButton::COUNT],
            client: (0.0, 0.0),
        }
    }

    fn apply(&mut self, op: &Op, model: &mut TickModel) {
        match *op {
            Op::Press(b) => {
                self.raw_pressed[b] = true;
                self.hub
                    .emit(EventName::Press, &RawEvent::Button { code: b as i32 });
            }
            Op::Release(b) => {
                self.raw_pressed[b] = false;
                self.hub
                    .emit(EventName::Release, &RawEvent::Button { code: b as i32 });
            }
            Op::Move(dx, dy) => {
                let (dx, dy) = (f64::from(dx), f64::from(dy));
                self.client = (self.client.0 + dx, self.client.1 + dy);
                model.delta = (model.delta.0 + dx, model.delta.1 + dy);
                model.moved = true;
                self.hub.emit(
                    EventName::Move,
                    &RawEvent::Motion {
                        client: self.client,
                        movement: Some((dx, dy)),
                    },
                );
            }
            Op::Wheel(amount) => {
                let amount = f64::from(amount);
                model.wheel = Some(-amount);
                self.hub.emit(
                    EventName::Wheel(WheelVariant::Pixel),
                    &RawEvent::Wheel { amount },
                );
            }
            Op::DoubleClick => {
                model.double_clicked = true;
                self.hub
                    .emit(EventName::DoubleActivate, &RawEvent::DoubleActivate);
            }
        }
    }
}

proptest! {
    #[test]
    fn edges_match_level_changes(frames in ticks()) {
        let mut driver = Driver::new();
        let idle = vec![Vec::new(), Vec::new()];

        for tick in frames.iter().chain(idle.iter()) {
            let previous = *driver.device.state();
            let mut model = TickModel::default();
            for op in tick {
                driver.apply(op, &mut model);
            }
            driver.device.update();
            let state = *driver.device.state();

            for button in PointerButton::ALL {
                let key = state.key(button);
                let was = previous.is_pressed(button);
                prop_assert!(!(key.just_pressed && key.just_released));
                prop_assert_eq!(key.just_pressed, !was && key.pressed);
                prop_assert_eq!(key.just_released, was && !key.pressed);

                let raw = driver.raw_pressed[button.index()];
                if !was && raw {
                    prop_assert!(key.just_pressed);
                }
                if was && !raw {
                    prop_assert!(key.just_released);
                }
            }

            if model.moved {
                prop_assert_eq!(state.delta(), model.delta);
                prop_assert_eq!(state.position(), driver.client);
            } else {
                prop_assert_eq!(state.delta(), (0.0, 0.0));
                prop_assert_eq!(state.position(), previous.position());
            }
            prop_assert_eq!(state.wheel_delta(), model.wheel.unwrap_or(0.0));
            prop_assert_eq!(state.was_double_clicked(), model.double_clicked);
        }

        for button in PointerButton::ALL {
            prop_assert_eq!(
                driver.device.is_pressed(button),
                driver.raw_pressed[button.index()]
            );
        }
    }

    #[test]
    fn repeated_presses_produce_one_pulse(repeats in 1usize..10, idle in 1usize..5) {
        let mut driver = Driver::new();
        let mut model = TickModel::default();
        for _ in 0..repeats {
            driver.apply(&Op::Press(0), &mut model);
        }

        let mut pulses = 0;
        for _ in 0..=idle {
            driver.device.update();
            if driver.device.was_just_pressed(PointerButton::Primary) {
                pulses += 1;
            }
            driver.apply(&Op::Press(0), &mut model);
        }
        prop_assert_eq!(pulses, 1);
    }
}
