/// Button transition delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

/// Edge-triggered state of a single pointer button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    /// Whether the button is currently held down.
    pub pressed: bool,
    /// Whether the button went down since the state was last consumed.
    pub just_pressed: bool,
    /// Whether the button went up since the state was last consumed.
    pub just_released: bool,
}

impl KeyState {
    /// Create a new, released key state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a platform transition.
    ///
    /// A press while already pressed (or a release while released) is ignored,
    /// so duplicated deliveries never produce a second edge.
    pub fn update(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press => {
                if !self.pressed {
                    self.pressed = true;
                    self.just_pressed = true;
                }
            }
            KeyAction::Release => {
                if self.pressed {
                    self.pressed = false;
                    self.just_released = true;
                }
            }
        }
    }

    /// Assign all three fields at once.
    pub fn set(&mut self, just_pressed: bool, pressed: bool, just_released: bool) {
        self.just_pressed = just_pressed;
        self.pressed = pressed;
        self.just_released = just_released;
    }

    /// Build the snapshot to publish for this tick and consume its edges.
    ///
    /// `previous_pressed` is the level published on the previous tick. When
    /// both edges were recorded since then, the one that happened first is
    /// published now and the other stays pending for the next tick; a
    /// press-release-press (or release-press-release) burst collapses into the
    /// single edge that matches the net change.
    pub fn publish(&mut self, previous_pressed: bool) -> KeyState {
        let mut published = *self;
        match (self.just_pressed, self.just_released) {
            (true, true) => match (previous_pressed, self.pressed) {
                (false, true) => {
                    published.set(true, true, false);
                    self.set(false, true, false);
                }
                (false, false) => {
                    published.set(true, true, false);
                    self.set(false, false, true);
                }
                (true, false) => {
                    published.set(false, false, true);
                    self.set(false, false, false);
                }
                (true, true) => {
                    published.set(false, false, true);
                    self.set(true, true, false);
                }
            },
            _ => {
                self.just_pressed = false;
                self.just_released = false;
            }
        }
        published
    }
}
