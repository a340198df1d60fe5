//=========================================================================
// Aetheric Bridge — Library Root
//
// Platform bridge between a real-time simulation thread and the OS-driven
// presentation, input and audio subsystems.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder` / `Engine`)
// - Expose the three cross-thread channels the simulation talks to
// - Keep the Winit / softbuffer / cpal integration private
//
// Typical usage:
// ```no_run
// use aetheric_bridge::{EngineBuilder, SimulationContext};
//
// fn main() {
//     EngineBuilder::new()
//         .build()
//         .run(|ctx: SimulationContext| { /* engine loop */ })
//         .expect("engine failed");
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent channels, the bridge that owns
// them, and the display backend seam.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the OS integration (window, event loop, surface,
// audio device) and is not part of the public API surface.
//
// `engine` wires everything together on startup.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::{Bridge, Simulation, SimulationContext};
pub use engine::{Engine, EngineBuilder, EngineError};
pub use platform::{AudioError, PlatformError};
