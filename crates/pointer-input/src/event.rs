/// Wheel event flavours a platform may offer.
///
/// Platforms expose exactly one of these; they differ in units and in the
/// sign convention of the reported amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelVariant {
    /// Legacy notch deltas, 120 per notch, positive away from the user.
    Notch,
    /// Line counts, positive toward the user.
    Line,
    /// Pixel deltas, positive toward the user.
    Pixel,
}

impl WheelVariant {
    /// Probe order used during negotiation.
    pub const PROBE_ORDER: [WheelVariant; 3] =
        [WheelVariant::Notch, WheelVariant::Line, WheelVariant::Pixel];
}

/// Names of the events a source can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    Wheel(WheelVariant),
    Press,
    Release,
    Move,
    ContactStart,
    ContactMove,
    ContactEnd,
    DoubleActivate,
    Enter,
    Leave,
}

/// Payload of a raw platform event.
///
/// Coordinates are client (viewport) coordinates, before any surface
/// translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// Wheel amount in the units of the subscribed [`WheelVariant`].
    Wheel { amount: f64 },
    /// Button press or release with the platform button code.
    Button { code: i32 },
    /// Pointer motion. `movement` is the platform's relative-motion field,
    /// when it has one.
    Motion {
        client: (f64, f64),
        movement: Option<(f64, f64)>,
    },
    /// Touch contact sample for the first active contact. Contact end events
    /// may carry no remaining contact.
    Contact { client: Option<(f64, f64)> },
    DoubleActivate,
    Enter,
    Leave,
}
