//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports what a simulation needs.
//
// Usage:
//   use aetheric_bridge::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine entry
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Bridge and simulation entry point
pub use crate::core::bridge::{Bridge, Simulation, SimulationContext};

// Channels
pub use crate::core::audio::AudioChannel;
pub use crate::core::frame::FrameSlot;
pub use crate::core::input::{EventQueue, InputEvent, KeyCode, KeyKind};

// Lifecycle
pub use crate::core::lifecycle::{ShutdownReason, ShutdownSignal};

// Fixed formats
pub use crate::core::config::{
    AUDIO_BLOCK_BYTES, AUDIO_CHANNELS, AUDIO_FRAME_BYTES, AUDIO_SAMPLE_RATE, FRAME_BYTES,
    FRAME_HEIGHT, FRAME_PIXELS, FRAME_WIDTH,
};
