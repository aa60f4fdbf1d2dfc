//! A winit window exposed as a pointer surface.

use std::cell::Cell;
use std::sync::Arc;

use log::debug;
use pointer_input::{
    BoundingBox, Callback, CaptureError, CaptureMode, EventHub, EventName, EventSource, RawEvent,
    Surface, SubscriptionId,
};
use winit::error::ExternalError;
use winit::event::WindowEvent;
use winit::window::{CursorGrabMode, Window};

/// Map a capture mode to the winit grab mode implementing it.
pub fn grab_mode(mode: CaptureMode) -> CursorGrabMode {
    match mode {
        CaptureMode::Locked => CursorGrabMode::Locked,
        CaptureMode::Confined => CursorGrabMode::Confined,
    }
}

/// Translate a winit grab failure.
pub fn capture_error(mode: CaptureMode, err: ExternalError) -> CaptureError {
    match err {
        ExternalError::NotSupported(_) => CaptureError::Unsupported(mode),
        other => CaptureError::Rejected {
            mode,
            reason: other.to_string(),
        },
    }
}

/// [`Surface`] backed by a winit window.
///
/// Coordinates from [`WinitEventSource`](crate::WinitEventSource) are already
/// window-relative, so the default viewport starts at the origin. Set a
/// viewport to report positions relative to a sub-region instead.
pub struct WindowSurface {
    window: Arc<Window>,
    hub: EventHub,
    viewport: Cell<Option<BoundingBox>>,
    inside: Cell<bool>,
}

impl WindowSurface {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            hub: EventHub::new([EventName::Enter, EventName::Leave]),
            viewport: Cell::new(None),
            inside: Cell::new(false),
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Report positions relative to `viewport` instead of the whole window.
    pub fn set_viewport(&self, viewport: Option<BoundingBox>) {
        self.viewport.set(viewport);
    }

    /// Forward `CursorEntered`/`CursorLeft` to subscribers.
    /// Returns `true` if the event was consumed.
    pub fn handle_window_event(&self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorEntered { .. } => {
                self.hub.emit(EventName::Enter, &RawEvent::Enter);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.hub.emit(EventName::Leave, &RawEvent::Leave);
                true
            }
            _ => false,
        }
    }
}

impl EventSource for WindowSurface {
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

impl Surface for WindowSurface {
    fn bounding_box(&self) -> BoundingBox {
        self.viewport.get().unwrap_or_else(|| {
            let size = self.window.inner_size();
            BoundingBox::new(0.0, 0.0, f64::from(size.width), f64::from(size.height))
        })
    }

    fn pointer_inside(&self) -> bool {
        self.inside.get()
    }

    fn set_pointer_inside(&self, inside: bool) {
        self.inside.set(inside);
    }

    fn capture_modes(&self) -> Vec<CaptureMode> {
        vec![CaptureMode::Locked, CaptureMode::Confined]
    }

    fn request_capture(&self, mode: CaptureMode) -> Result<(), CaptureError> {
        self.window
            .set_cursor_grab(grab_mode(mode))
            .map_err(|e| capture_error(mode, e))?;
        self.window.set_cursor_visible(false);
        debug!("cursor grabbed with {mode:?}");
        Ok(())
    }

    fn release_capture(&self, mode: CaptureMode) -> Result<(), CaptureError> {
        self.window
            .set_cursor_grab(CursorGrabMode::None)
            .map_err(|e| capture_error(mode, e))?;
        self.window.set_cursor_visible(true);
        Ok(())
    }
}
