//=========================================================================
// Process Lifecycle
//=========================================================================
//
// One-shot shutdown signal from the platform to everyone else.
//
// Architecture:
//   ShutdownTrigger ──crossbeam bounded(1)──► ShutdownSignal (cloneable)
//
// Window close and mouse-button-down are shutdown requests, not input.
// The trigger sends the reason once and then drops its sender, so every
// clone of the signal observes the channel as disconnected afterwards.
// Dropping the trigger without firing it (platform thread gone) counts as
// a shutdown request too.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Crates =====================================================

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use log::info;

//=== ShutdownReason ======================================================

/// Why the platform asked the process to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// User or OS closed the window.
    WindowClosed,

    /// A mouse button was pressed inside the window.
    MouseButton,

    /// The window could not be created at all.
    WindowCreationFailed,
}

//=== Construction ========================================================

/// Creates a connected trigger/signal pair.
pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (sender, receiver) = bounded(1);
    (
        ShutdownTrigger {
            sender: Some(sender),
        },
        ShutdownSignal { receiver },
    )
}

//=== ShutdownTrigger =====================================================

/// Platform-side handle that raises the shutdown signal.
#[derive(Debug)]
pub struct ShutdownTrigger {
    sender: Option<Sender<ShutdownReason>>,
}

impl ShutdownTrigger {
    /// Raises the signal. Returns false if it was already raised.
    pub fn trigger(&mut self, reason: ShutdownReason) -> bool {
        let Some(sender) = self.sender.take() else {
            return false;
        };

        info!(target: "platform", "Shutdown requested: {:?}", reason);
        // Capacity 1 and a single send: this cannot be full. A send error
        // only means every signal is gone already.
        let _ = sender.try_send(reason);
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.sender.is_none()
    }
}

//=== ShutdownSignal ======================================================

/// Observer side; poll it from any thread.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    receiver: Receiver<ShutdownReason>,
}

impl ShutdownSignal {
    /// Non-blocking check.
    pub fn is_requested(&self) -> bool {
        match self.receiver.try_recv() {
            Ok(_) | Err(TryRecvError::Disconnected) => true,
            Err(TryRecvError::Empty) => false,
        }
    }

    /// Sleeps up to `timeout`, waking early on shutdown.
    ///
    /// Returns true if shutdown was requested. Lets a simulation pace its
    /// ticks without missing the signal for a whole tick.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(_) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
