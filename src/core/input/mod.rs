//=========================================================================
// Input Channel
//
// OS event thread → simulation thread handoff of key transitions.
//
// Responsibilities:
// - Define the engine key space and the key transition event
// - Carry transitions across the thread boundary in observation order
//
// Notes:
// Translation from platform symbols happens on the event thread (see the
// platform keymap) before anything reaches this module. Shutdown signals
// (window close, mouse click) never enter the queue.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod queue;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, KeyKind};
pub use queue::EventQueue;
