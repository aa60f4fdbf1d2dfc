//! Capability negotiation against an [`EventSource`].
//!
//! Resolved once when a device is constructed; never re-probed.

use crate::config::InteractionPreference;
use crate::event::{EventName, WheelVariant};
use crate::source::EventSource;

/// How presses and motion reach the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionModel {
    /// Separate press, release and move events per button.
    Pointer,
    /// A single active contact; contact start/end act as the primary button.
    Touch,
}

/// Pick the first wheel variant the source advertises, in
/// [`WheelVariant::PROBE_ORDER`]. Falls back to [`WheelVariant::Pixel`].
pub fn negotiate_wheel(source: &dyn EventSource) -> WheelVariant {
    WheelVariant::PROBE_ORDER
        .into_iter()
        .find(|variant| source.supports(EventName::Wheel(*variant)))
        .unwrap_or(WheelVariant::Pixel)
}

pub fn negotiate_model(
    source: &dyn EventSource,
    preference: InteractionPreference,
) -> InteractionModel {
    match preference {
        InteractionPreference::Pointer => InteractionModel::Pointer,
        InteractionPreference::Touch => InteractionModel::Touch,
        InteractionPreference::Auto => {
            if source.supports(EventName::ContactStart) {
                InteractionModel::Touch
            } else {
                InteractionModel::Pointer
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::EventHub;

    #[test]
    fn wheel_probe_order() {
        let all = EventHub::new(WheelVariant::PROBE_ORDER.map(EventName::Wheel));
        assert_eq!(negotiate_wheel(&all), WheelVariant::Notch);

        let line_and_pixel = EventHub::new([
            EventName::Wheel(WheelVariant::Pixel),
            EventName::Wheel(WheelVariant::Line),
        ]);
        assert_eq!(negotiate_wheel(&line_and_pixel), WheelVariant::Line);

        assert_eq!(negotiate_wheel(&EventHub::pointer()), WheelVariant::Pixel);
    }

    #[test]
    fn wheel_falls_back_to_pixel() {
        let none = EventHub::new([EventName::Press]);
        assert_eq!(negotiate_wheel(&none), WheelVariant::Pixel);
    }

    #[test]
    fn model_follows_contact_support() {
        assert_eq!(
            negotiate_model(&EventHub::pointer(), InteractionPreference::Auto),
            InteractionModel::Pointer
        );
        assert_eq!(
            negotiate_model(&EventHub::touch(), InteractionPreference::Auto),
            InteractionModel::Touch
        );
    }

    #[test]
    fn model_preference_overrides_probe() {
        assert_eq!(
            negotiate_model(&EventHub::touch(), InteractionPreference::Pointer),
            InteractionModel::Pointer
        );
        assert_eq!(
            negotiate_model(&EventHub::pointer(), InteractionPreference::Touch),
            InteractionModel::Touch
        );
    }
}
