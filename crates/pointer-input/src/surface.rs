//! Display surface abstraction: coordinate origin, pointer containment and
//! exclusive pointer capture.

use std::cell::{Cell, RefCell};

use log::debug;
use thiserror::Error;

use crate::event::{EventName, RawEvent};
use crate::source::{Callback, EventHub, EventSource, SubscriptionId};

/// Placement of a surface in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Translate a client point into surface-relative coordinates.
    pub fn to_local(&self, client: (f64, f64)) -> (f64, f64) {
        (client.0 - self.left, client.1 - self.top)
    }

    /// Whether a client point lies inside the box (right/bottom edges excluded).
    pub fn contains(&self, client: (f64, f64)) -> bool {
        client.0 >= self.left
            && client.1 >= self.top
            && client.0 < self.left + self.width
            && client.1 < self.top + self.height
    }
}

/// Platform entry points for exclusive pointer capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureMode {
    /// Pointer hidden and pinned; only relative motion is reported.
    Locked,
    /// Pointer kept inside the surface.
    Confined,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("capture mode {0:?} is not supported on this platform")]
    Unsupported(CaptureMode),

    #[error("capture mode {mode:?} was rejected: {reason}")]
    Rejected { mode: CaptureMode, reason: String },
}

/// A display surface pointer coordinates are reported against.
///
/// A surface is also an event source for its own `Enter`/`Leave` events. The
/// pointer-inside flag belongs to the surface; devices toggle it from those
/// events so containment queries never measure anything.
pub trait Surface: EventSource {
    /// Current placement in client coordinates. May change between calls.
    fn bounding_box(&self) -> BoundingBox;

    fn pointer_inside(&self) -> bool;

    fn set_pointer_inside(&self, inside: bool);

    /// Capture entry points in preference order.
    fn capture_modes(&self) -> Vec<CaptureMode>;

    fn request_capture(&self, mode: CaptureMode) -> Result<(), CaptureError>;

    fn release_capture(&self, mode: CaptureMode) -> Result<(), CaptureError>;
}

/// Resolves which capture entry point works and remembers it.
///
/// The first acquire walks the surface's modes in order and keeps the first
/// one that succeeds; later calls only use that mode. Failures are logged and
/// dropped.
#[derive(Debug, Default)]
pub struct CaptureNegotiator {
    resolved: Option<CaptureMode>,
}

impl CaptureNegotiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mode that last succeeded, if any.
    pub fn resolved(&self) -> Option<CaptureMode> {
        self.resolved
    }

    pub fn reset(&mut self) {
        self.resolved = None;
    }

    pub fn acquire(&mut self, surface: &dyn Surface) {
        if let Some(mode) = self.resolved {
            if let Err(e) = surface.request_capture(mode) {
                debug!("pointer capture request failed: {e}");
            }
            return;
        }
        for mode in surface.capture_modes() {
            match surface.request_capture(mode) {
                Ok(()) => {
                    debug!("pointer capture resolved to {mode:?}");
                    self.resolved = Some(mode);
                    return;
                }
                Err(e) => debug!("pointer capture fallback: {e}"),
            }
        }
        debug!("no pointer capture mode available");
    }

    pub fn release(&mut self, surface: &dyn Surface) {
        if let Some(mode) = self.resolved {
            if let Err(e) = surface.release_capture(mode) {
                debug!("pointer capture release failed: {e}");
            }
            return;
        }
        for mode in surface.capture_modes() {
            match surface.release_capture(mode) {
                Ok(()) => return,
                Err(e) => debug!("pointer capture release fallback: {e}"),
            }
        }
    }
}

/// Capture call recorded by [`VirtualSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCall {
    Request(CaptureMode),
    Release(CaptureMode),
}

/// In-memory surface for testing.
///
/// Enter/leave events are delivered through [`VirtualSurface::enter`] and
/// [`VirtualSurface::leave`]; capture succeeds only for the modes marked
/// available.
pub struct VirtualSurface {
    hub: EventHub,
    bounds: Cell<BoundingBox>,
    inside: Cell<bool>,
    modes: Vec<CaptureMode>,
    available: Vec<CaptureMode>,
    captured: Cell<Option<CaptureMode>>,
    calls: RefCell<Vec<CaptureCall>>,
}

impl VirtualSurface {
    /// Surface offering `[Locked, Confined]`, both available.
    pub fn new(bounds: BoundingBox) -> Self {
        let modes = vec![CaptureMode::Locked, CaptureMode::Confined];
        Self::with_capture(bounds, modes.clone(), modes)
    }

    pub fn with_capture(
        bounds: BoundingBox,
        modes: Vec<CaptureMode>,
        available: Vec<CaptureMode>,
    ) -> Self {
        Self {
            hub: EventHub::new([EventName::Enter, EventName::Leave]),
            bounds: Cell::new(bounds),
            inside: Cell::new(false),
            modes,
            available,
            captured: Cell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Move or resize the surface.
    pub fn set_bounding_box(&self, bounds: BoundingBox) {
        self.bounds.set(bounds);
    }

    pub fn enter(&self) {
        self.hub.emit(EventName::Enter, &RawEvent::Enter);
    }

    pub fn leave(&self) {
        self.hub.emit(EventName::Leave, &RawEvent::Leave);
    }

    /// Mode currently holding the capture.
    pub fn captured(&self) -> Option<CaptureMode> {
        self.captured.get()
    }

    pub fn capture_calls(&self) -> Vec<CaptureCall> {
        self.calls.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.hub.total_listeners()
    }
}

impl EventSource for VirtualSurface {
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

impl Surface for VirtualSurface {
    fn bounding_box(&self) -> BoundingBox {
        self.bounds.get()
    }

    fn pointer_inside(&self) -> bool {
        self.inside.get()
    }

    fn set_pointer_inside(&self, inside: bool) {
        self.inside.set(inside);
    }

    fn capture_modes(&self) -> Vec<CaptureMode> {
        self.modes.clone()
    }

    fn request_capture(&self, mode: CaptureMode) -> Result<(), CaptureError> {
        self.calls.borrow_mut().push(CaptureCall::Request(mode));
        if !self.available.contains(&mode) {
            return Err(CaptureError::Unsupported(mode));
        }
        self.captured.set(Some(mode));
        Ok(())
    }

    fn release_capture(&self, mode: CaptureMode) -> Result<(), CaptureError> {
        self.calls.borrow_mut().push(CaptureCall::Release(mode));
        if !self.available.contains(&mode) {
            return Err(CaptureError::Unsupported(mode));
        }
        if self.captured.get() == Some(mode) {
            self.captured.set(None);
        }
        Ok(())
    }
}
