//=========================================================================
// Bridge
//=========================================================================
//
// Owner of all state shared between the simulation, the event/presentation
// thread and the audio callback.
//
// Architecture:
// ```text
//                       Arc<Bridge>
//        ┌──────────────┬───────────┬──────────────┐
//        │ frames       │ input     │ audio        │
//        │ FrameSlot    │ EventQueue│ AudioChannel │
//        └──────────────┴───────────┴──────────────┘
//   Simulation:   publish_frame  try_pop_event  write_samples
//   Event thread: present        push_key_event
//   Audio cb:                                   on_drain_request
// ```
//
// Built once by the engine and handed to each thread's entry point.
// There are no process-wide globals; each channel has its own lock.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== Internal Imports ====================================================

use crate::core::audio::AudioChannel;
use crate::core::frame::FrameSlot;
use crate::core::input::EventQueue;
use crate::core::lifecycle::ShutdownSignal;

//=== Bridge ==============================================================

/// The three cross-thread channels.
#[derive(Debug, Default)]
pub struct Bridge {
    /// Simulation → presentation.
    pub frames: FrameSlot,

    /// Event thread → simulation.
    pub input: EventQueue,

    /// Simulation → audio callback.
    pub audio: AudioChannel,
}

impl Bridge {
    pub fn new() -> Self {
        Self::default()
    }
}

//=== SimulationContext ===================================================

/// Everything the simulation entry point receives.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub bridge: Arc<Bridge>,
    pub shutdown: ShutdownSignal,
}

//=== Simulation ==========================================================

/// The external engine loop.
///
/// `run` is invoked once on a dedicated thread and may run until process
/// exit. It talks to the rest of the process only through the context.
pub trait Simulation: Send + 'static {
    fn run(self, context: SimulationContext);
}

impl<F> Simulation for F
where
    F: FnOnce(SimulationContext) + Send + 'static,
{
    fn run(self, context: SimulationContext) {
        self(context)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
