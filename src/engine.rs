//=========================================================================
// Aetheric Bridge Engine
//
// Main entry point: wires the simulation, the platform and the audio
// device around one shared `Bridge`.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(sim)──>  [Runtime]
//         │                          │
//         ├─ with_title()            ├─ opens audio device (fatal)
//         └─ with_scale()            ├─ spawns simulation thread
//                                    └─ runs platform event loop
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;
use std::thread;

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::bridge::{Bridge, Simulation, SimulationContext};
use crate::core::lifecycle;
use crate::platform::{AudioDevice, AudioError, Platform, PlatformError, WindowConfig};

//=== EngineError =========================================================

/// Errors that stop the engine from running.
#[derive(Debug)]
pub enum EngineError {
    /// Audio output could not be opened.
    Audio(AudioError),

    /// The simulation thread could not be spawned.
    Spawn(std::io::Error),

    /// The platform event loop failed.
    Platform(PlatformError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Audio(e) => write!(f, "Audio initialization failed: {}", e),
            Self::Spawn(e) => write!(f, "Simulation thread spawn failed: {}", e),
            Self::Platform(e) => write!(f, "Platform failure: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Audio(e) => Some(e),
            Self::Spawn(e) => Some(e),
            Self::Platform(e) => Some(e),
        }
    }
}

impl From<AudioError> for EngineError {
    fn from(e: AudioError) -> Self {
        Self::Audio(e)
    }
}

impl From<PlatformError> for EngineError {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// Only window presentation is configurable. Frame size, pixel format and
/// audio format are fixed (see [`crate::core::config`]).
///
/// # Default Values
///
/// - **Title**: "Aetheric"
/// - **Scale**: 1 (640×480 logical window)
///
/// # Examples
///
/// ```no_run
/// use aetheric_bridge::{EngineBuilder, SimulationContext};
///
/// EngineBuilder::new()
///     .with_title("Demo")
///     .with_scale(2)
///     .build()
///     .run(|ctx: SimulationContext| {
///         while !ctx.shutdown.is_requested() {
///             while let Some(event) = ctx.bridge.input.try_pop_event() {
///                 let _ = event;
///             }
///         }
///     })
///     .expect("engine failed");
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    title: String,
    scale: u32,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Aetheric".to_string(),
            scale: 1,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the integer window scale relative to the frame size.
    ///
    /// Default: 1
    ///
    /// # Panics
    ///
    /// Panics if `scale == 0`.
    pub fn with_scale(mut self, scale: u32) -> Self {
        assert!(scale > 0, "Window scale must be positive");
        self.scale = scale;
        self
    }

    /// Builds the engine instance and its bridge.
    pub fn build(self) -> Engine {
        info!(target: "engine", "Building engine (title: {:?}, scale: {})", self.title, self.scale);

        Engine {
            bridge: Arc::new(Bridge::new()),
            config: WindowConfig {
                title: self.title,
                scale: self.scale,
            },
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Bridge runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► AudioDevice (cpal callback)   ── drains bridge.audio
///   ├─► Simulation (own thread)       ── publishes / writes / pops
///   └─► Platform (event loop)         ── pushes keys, presents frames
/// ```
pub struct Engine {
    bridge: Arc<Bridge>,
    config: WindowConfig,
}

impl Engine {
    /// The shared channels, e.g. for pre-seeding before `run`.
    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Opens the audio device (failure is returned, nothing else starts)
    /// 2. Spawns the simulation thread with the bridge and shutdown signal
    /// 3. Runs the platform event loop on the calling thread
    /// 4. On close/click: shutdown signal raised, loop exits, audio stops
    ///
    /// The simulation thread is not joined; it may run until process exit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if audio cannot be opened, the simulation
    /// thread cannot be spawned, or the event loop fails.
    pub fn run<S: Simulation>(self, simulation: S) -> Result<(), EngineError> {
        info!(target: "engine", "Starting engine runtime");

        //--- 1. Open audio output -----------------------------------------
        let audio = AudioDevice::open(Arc::clone(&self.bridge))?;

        //--- 2. Spawn the simulation thread -------------------------------
        let (trigger, shutdown) = lifecycle::channel();
        let context = SimulationContext {
            bridge: Arc::clone(&self.bridge),
            shutdown,
        };

        thread::Builder::new()
            .name("simulation".to_string())
            .spawn(move || simulation.run(context))
            .map_err(EngineError::Spawn)?;
        info!(target: "engine", "Simulation thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(Arc::clone(&self.bridge), trigger, self.config);
        info!(target: "engine", "Platform initialized, entering event loop");

        let result = platform.run();

        //--- 4. Cleanup ---------------------------------------------------
        drop(audio);

        match &result {
            Ok(()) => info!(target: "engine", "Engine shutdown complete"),
            Err(e) => error!(target: "engine", "Platform error: {}", e),
        }

        result.map_err(EngineError::from)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.title, "Aetheric");
        assert_eq!(builder.scale, 1);
    }

    #[test]
    fn builder_with_title() {
        let builder = EngineBuilder::new().with_title("DOOM");
        assert_eq!(builder.title, "DOOM");
    }

    #[test]
    fn builder_with_scale() {
        let builder = EngineBuilder::new().with_scale(3);
        assert_eq!(builder.scale, 3);
    }

    #[test]
    #[should_panic(expected = "Window scale must be positive")]
    fn builder_with_scale_panics_on_zero() {
        EngineBuilder::new().with_scale(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_title("Chained")
            .with_scale(2)
            .build();

        assert_eq!(engine.config.title, "Chained");
        assert_eq!(engine.config.scale, 2);
    }

    #[test]
    fn built_engine_has_fresh_bridge() {
        let engine = EngineBuilder::default().build();
        assert_eq!(engine.bridge().frames.generation(), 0);
        assert!(engine.bridge().input.is_empty());
    }

    //=====================================================================
    // EngineError Tests
    //=====================================================================

    #[test]
    fn engine_error_wraps_audio_error() {
        let err = EngineError::from(AudioError::NoDevice);
        assert_eq!(
            err.to_string(),
            "Audio initialization failed: No audio output device available"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
