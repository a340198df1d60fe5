//=========================================================================
// Event Queue
//=========================================================================
//
// Ordered key-event handoff from the OS event thread to the simulation.
//
// Architecture:
//   Event thread: push_key_event() ──► [ VecDeque ] ──► try_pop_event()
//                                      (one lock)       Simulation tick
//
// - FIFO: insertion order is delivery order, nothing is coalesced.
// - Unbounded: growth is limited only by memory. The simulation drains
//   the queue every tick, so depth stays at a handful of events.
// - Both ends hold the lock only for one push or pop, so neither side can
//   stall the other beyond a `VecDeque` operation.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::VecDeque;

//=== External Crates =====================================================

use log::trace;

//=== Internal Imports ====================================================

use super::event::{InputEvent, KeyCode, KeyKind};
use crate::core::sync::Exclusive;

//=== EventQueue ==========================================================

/// Single-producer, single-consumer FIFO of key transitions.
#[derive(Debug)]
pub struct EventQueue {
    events: Exclusive<VecDeque<InputEvent>>,
}

impl EventQueue {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        const INITIAL_CAPACITY: usize = 64;

        Self {
            events: Exclusive::new(VecDeque::with_capacity(INITIAL_CAPACITY)),
        }
    }

    //--- Producer Side ----------------------------------------------------

    /// Appends a key transition to the tail of the queue.
    ///
    /// Called by the event thread for every raw key notification, already
    /// translated into the engine key space.
    pub fn push_key_event(&self, kind: KeyKind, code: KeyCode) {
        self.push(InputEvent::new(kind, code));
    }

    /// Appends an already-built event to the tail of the queue.
    pub fn push(&self, event: InputEvent) {
        let depth = self.events.with(|events| {
            events.push_back(event);
            events.len()
        });
        trace!(target: "bridge::input", "Queued {:?} (depth {})", event, depth);
    }

    //--- Consumer Side ----------------------------------------------------

    /// Removes and returns the oldest pending event, if any.
    ///
    /// Never blocks beyond the single pop.
    pub fn try_pop_event(&self) -> Option<InputEvent> {
        self.events.with(VecDeque::pop_front)
    }

    /// Moves every pending event into `out`, oldest first.
    ///
    /// Takes the lock once, for simulations that consume a whole tick's
    /// worth of input at a time. Returns the number of events moved.
    pub fn drain_into(&self, out: &mut Vec<InputEvent>) -> usize {
        self.events.with(|events| {
            let count = events.len();
            out.extend(events.drain(..));
            count
        })
    }

    //--- Utilities --------------------------------------------------------

    pub fn len(&self) -> usize {
        self.events.with(|events| events.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
