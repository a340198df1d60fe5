//=========================================================================
// Core
//
// Platform-independent half of the bridge.
//
// Responsibilities:
// - Own the three cross-thread channels (frame, input, audio)
// - Define the seam the presentation backend plugs into
// - Carry the shutdown signal from the platform to the simulation
//
// Notes:
// Nothing in here touches winit, softbuffer or cpal. Every type is usable
// (and tested) without a window or an audio device.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod audio;
pub mod bridge;
pub mod config;
pub mod display;
pub mod frame;
pub mod input;
pub mod lifecycle;

pub(crate) mod sync;

//=== Public API ==========================================================

pub use audio::{AudioChannel, AudioStats, BlockRole};
pub use bridge::{Bridge, Simulation, SimulationContext};
pub use display::{DisplayBackend, DisplayError};
pub use frame::{FramePresenter, FrameSlot, PresentOutcome};
pub use input::{EventQueue, InputEvent, KeyCode, KeyKind};
pub use lifecycle::{ShutdownReason, ShutdownSignal, ShutdownTrigger};
