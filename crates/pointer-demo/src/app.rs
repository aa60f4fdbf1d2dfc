use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use log::{debug, error, info};
use pointer_input::{PointerButton, PointerDevice, PointerState};
use pointer_input_winit::{WindowSurface, WinitEventSource};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::DemoConfig;

/// Summarize what changed in a frame, or `None` for an idle frame.
pub fn describe_frame(state: &PointerState) -> Option<String> {
    let mut parts = Vec::new();
    for button in PointerButton::ALL {
        if state.was_just_pressed(button) {
            parts.push(format!("{button:?} pressed"));
        }
        if state.was_just_released(button) {
            parts.push(format!("{button:?} released"));
        }
    }
    let (dx, dy) = state.delta();
    if dx != 0.0 || dy != 0.0 {
        let (x, y) = state.position();
        parts.push(format!("moved ({dx:+.1}, {dy:+.1}) to ({x:.1}, {y:.1})"));
    }
    if state.wheel_delta() != 0.0 {
        parts.push(format!("wheel {:+.1}", state.wheel_delta()));
    }
    if state.was_double_clicked() {
        parts.push("double click".to_string());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Everything that exists once the window is up.
struct Session {
    window: Arc<Window>,
    source: Rc<WinitEventSource>,
    surface: Rc<WindowSurface>,
    device: PointerDevice,
    captured: bool,
}

impl Session {
    fn new(window: Window, config: &DemoConfig) -> Self {
        let window = Arc::new(window);
        let source = Rc::new(WinitEventSource::new(config.winit.clone()));
        let surface = Rc::new(WindowSurface::new(window.clone()));
        let mut device = PointerDevice::with_config(source.clone(), &config.pointer);
        device.bind_surface(surface.clone());
        info!(
            "pointer device ready: {:?} model, {:?} wheel",
            device.interaction_model(),
            device.wheel_variant()
        );
        Self {
            window,
            source,
            surface,
            device,
            captured: false,
        }
    }

    fn frame(&mut self) {
        self.device.update();
        if let Some(summary) = describe_frame(self.device.state()) {
            info!("{summary}");
        }
        if self.device.was_just_pressed(PointerButton::Secondary) {
            self.set_capture(!self.captured);
        }
    }

    fn set_capture(&mut self, enabled: bool) {
        self.device.set_capture(enabled);
        self.source.set_relative_motion(enabled);
        self.captured = enabled;
        debug!("capture {}", if enabled { "on" } else { "off" });
    }

    fn shutdown(&mut self) {
        if self.captured {
            self.set_capture(false);
        }
        self.device.dispose();
    }
}

struct DemoApp {
    config: DemoConfig,
    session: Option<Session>,
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("pointer-demo")
            .with_inner_size(PhysicalSize::new(960, 540));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let session = Session::new(window, &self.config);
                session.window.request_redraw();
                self.session = Some(session);
            }
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match &event {
            WindowEvent::CloseRequested => {
                session.shutdown();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                session.frame();
                session.window.request_redraw();
            }
            _ => {
                if !session.surface.handle_window_event(&event) {
                    session.source.handle_window_event(&event);
                }
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(session) = &self.session {
            session.source.handle_device_event(&event);
        }
    }
}

/// Open the demo window and run until it is closed.
pub fn run(config: DemoConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| anyhow!("failed to create event loop: {e}"))?;
    let mut app = DemoApp {
        config,
        session: None,
    };
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("event loop error: {e}"))?;
    Ok(())
}
