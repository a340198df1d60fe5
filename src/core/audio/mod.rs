//=========================================================================
// Audio Channel
//
// Simulation thread → OS audio callback handoff of PCM bytes.
//
// Responsibilities:
// - Accept sample bytes from the simulation without ever blocking it on
//   the callback
// - Serve the callback from a block the simulation is not writing
// - Pad underruns with silence instead of replaying stale data
//
//=========================================================================

//=== Submodules ==========================================================

mod block;
mod channel;

//=== Public API ==========================================================

pub use block::BlockRole;
pub use channel::{AudioChannel, AudioStats};
