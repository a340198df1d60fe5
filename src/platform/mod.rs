//=========================================================================
// Platform Subsystem
//
// Drives the OS window, the presentation surface and the event pump, and
// feeds the bridge from the OS side.
//
// Architecture:
// ```text
//  Main Thread (event loop):               Simulation Thread:
//  ┌───────────────────────────────┐      ┌─────────────────────┐
//  │  Winit Event Loop             │      │  Engine loop        │
//  │   │                           │      │                     │
//  │   ├─ KeyboardInput            │      │                     │
//  │   │   └─ keymap → EventQueue ─┼──────┼─► try_pop_event()   │
//  │   │                           │      │                     │
//  │   ├─ MouseInput / Close       │      │                     │
//  │   │   └─ ShutdownTrigger ─────┼──────┼─► ShutdownSignal    │
//  │   │                           │      │                     │
//  │   └─ RedrawRequested          │      │                     │
//  │       └─ FramePresenter ◄─────┼──────┼── publish_frame()   │
//  │           └─ SoftbufferDisplay│      │                     │
//  └───────────────────────────────┘      └─────────────────────┘
//                                          Audio callback (cpal):
//                                            on_drain_request() ◄─ write_samples()
// ```
//
// Key Design Decisions:
// - **Display calls stay here**: the window, surface and texture are
//   created and used only on this thread. The simulation publishes
//   frames; it never draws.
// - **RedrawRequested = present**: every redraw shows the latest
//   published frame and requests the next redraw, so presentation runs at
//   the display's cadence regardless of the simulation's tick rate.
// - **Clicks quit**: mouse-button-down and window close raise the
//   shutdown signal and exit the loop. They never reach the input queue.
// - **Missing display is not an error**: until the surface exists (or
//   while the window is minimized), presentation is skipped.
//
//=========================================================================

//=== Submodules ==========================================================

mod audio_device;
mod display;
mod keymap;

//=== External Crates =====================================================

use std::rc::Rc;
use std::sync::Arc;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::bridge::Bridge;
use crate::core::config::{FRAME_HEIGHT, FRAME_WIDTH};
use crate::core::frame::{FramePresenter, PresentOutcome};
use crate::core::lifecycle::{ShutdownReason, ShutdownTrigger};

pub use audio_device::AudioError;
pub(crate) use audio_device::AudioDevice;
use display::SoftbufferDisplay;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal - if the event loop can't be created, nothing can be
/// presented and no input can be collected.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== WindowConfig ========================================================

/// Window parameters chosen by the engine builder.
#[derive(Debug, Clone)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub scale: u32,
}

//=== Platform ============================================================

/// Window owner, event pump and frame presenter.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(...)` - no OS resources yet
/// 2. **Execution**: `platform.run()` - blocks in the Winit event loop
/// 3. **Startup**: `resumed()` creates the window and display surface
/// 4. **Shutdown**: close or click → trigger shutdown → exit loop
///
/// # Thread Safety
///
/// Not `Send`: the window and surface must stay on the thread that
/// created them. Everything crossing threads goes through the bridge.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Rc<Window>>,

    /// Presentation surface (None until the window exists).
    display: Option<SoftbufferDisplay>,

    /// Presentation-side half of the frame channel.
    presenter: FramePresenter,

    /// Shared channels.
    bridge: Arc<Bridge>,

    /// Raises the process shutdown signal.
    shutdown: ShutdownTrigger,

    config: WindowConfig,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the platform; the window is created lazily in `resumed()`.
    pub fn new(bridge: Arc<Bridge>, shutdown: ShutdownTrigger, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            display: None,
            presenter: FramePresenter::new(),
            bridge,
            shutdown,
            config,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread on platforms where Winit
    /// requires it (macOS/iOS).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(PlatformError::EventLoopCreation)?;

        event_loop.run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Event Routing ----------------------------------------------------

    /// Translates a raw key notification and appends it to the input queue.
    fn route_key(&self, physical_key: PhysicalKey, state: ElementState) {
        let code = keymap::translate_key(physical_key);
        let kind = keymap::translate_state(state);

        if code.is_unidentified() {
            trace!(target: "platform::input", "Unmapped key {:?} queued as sentinel", physical_key);
        }

        self.bridge.input.push_key_event(kind, code);
    }

    /// Raises the shutdown signal. Returns true the first time.
    fn request_shutdown(&mut self, reason: ShutdownReason) -> bool {
        self.shutdown.trigger(reason)
    }

    /// Shows the latest published frame if a surface exists.
    fn present(&mut self) -> PresentOutcome {
        let Some(display) = self.display.as_mut() else {
            return PresentOutcome::BackendUnavailable;
        };

        self.presenter.present(&self.bridge.frames, display)
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window and its display surface if they don't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let scale = self.config.scale as f64;
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(
                FRAME_WIDTH as f64 * scale,
                FRAME_HEIGHT as f64 * scale,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.request_shutdown(ShutdownReason::WindowCreationFailed);
                event_loop.exit();
                return;
            }
        };

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        match SoftbufferDisplay::new(Rc::clone(&window)) {
            Ok(display) => self.display = Some(display),
            // Presentation stays a no-op; input and audio keep working.
            Err(e) => error!(target: "platform::display", "{}", e),
        }

        window.request_redraw();
        self.window = Some(window);
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.request_shutdown(ShutdownReason::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::MouseInput { state: ElementState::Pressed, button, .. } => {
                info!(target: "platform", "Mouse button {:?} pressed, quitting", button);
                self.request_shutdown(ShutdownReason::MouseButton);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.route_key(key_event.physical_key, key_event.state);
            }

            WindowEvent::Resized(size) => {
                if let Some(display) = self.display.as_mut() {
                    if let Err(e) = display.resize(size.width, size.height) {
                        warn!(target: "platform::display", "{}", e);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: show the newest frame, ask for the next.
                if let PresentOutcome::Failed = self.present() {
                    trace!(target: "platform::display", "Present failed, retrying next redraw");
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Focused, CursorMoved, mouse release, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
