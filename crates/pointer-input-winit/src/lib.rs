//! winit backend for `pointer-input`.
//!
//! [`WinitEventSource`] turns window and device events into pointer events and
//! [`WindowSurface`] exposes the window for coordinate translation, enter/leave
//! tracking and cursor grabs.

mod source;
mod surface;

pub use source::{
    DoubleClickDetector, WinitEventSource, WinitSourceConfig, button_code, wheel_pixels,
};
pub use surface::{WindowSurface, capture_error, grab_mode};
