//! Frame-synchronous pointer input.
//!
//! Platform pointer and touch events arrive whenever the platform delivers
//! them; a [`PointerDevice`] collects them in a staging buffer and publishes a
//! stable [`PointerState`] once per frame when the application calls
//! [`PointerDevice::update`].
//!
//! This crate provides:
//! - [`PointerDevice`]: staging/public double buffer, subscriptions, surface binding
//! - [`KeyState`]: per-button edge tracking
//! - [`EventSource`] / [`EventHub`]: platform event delivery
//! - [`Surface`] / [`VirtualSurface`]: coordinate origin, containment and capture
//! - [`PointerConfig`]: wheel normalization and interaction model preference

mod button;
mod config;
mod device;
mod event;
mod key_state;
mod negotiate;
mod source;
mod surface;

pub use button::PointerButton;
pub use config::{InteractionPreference, PointerConfig, WheelScale};
pub use device::{PointerDevice, PointerState};
pub use event::{EventName, RawEvent, WheelVariant};
pub use key_state::{KeyAction, KeyState};
pub use negotiate::{InteractionModel, negotiate_model, negotiate_wheel};
pub use source::{Callback, EventHub, EventSource, SubscriptionId};
pub use surface::{
    BoundingBox, CaptureCall, CaptureError, CaptureMode, CaptureNegotiator, Surface,
    VirtualSurface,
};
