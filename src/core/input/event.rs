//=========================================================================
// Key Event Types
//
// Defines the engine-facing representation of keyboard transitions.
//
// This module abstracts away platform-specific key symbols (e.g. Winit)
// into the small, fixed key space the simulation understands.
//
// Design:
// - `KeyCode` is `Copy` and hashable; it identifies a physical key, not
//   the character it produces.
// - `InputEvent` is immutable once created. Equality is plain structural
//   equality: a repeated KeyDown is a distinct, delivered event.
// - `KeyCode::Unidentified` is the sentinel every unmapped platform symbol
//   resolves to. The simulation treats it as a key bound to nothing.
//
//=========================================================================

//=== KeyKind =============================================================

/// Direction of a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Key pressed (including OS key-repeat presses).
    Down,

    /// Key released.
    Up,
}

//=== KeyCode =============================================================

/// Physical key identifier in the engine's key space.
///
/// Covers what a classic keyboard-driven game loop binds: navigation,
/// modifiers, function keys, letters and the digit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Navigation -------------------------------------------------------

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    //--- Special Keys -----------------------------------------------------

    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    Pause,
    Minus,
    Equals,
    Comma,
    Period,

    //--- Modifiers --------------------------------------------------------

    /// Either shift key.
    Shift,

    /// Either control key.
    Ctrl,

    /// Either alt key.
    Alt,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Alphanumeric -----------------------------------------------------

    /// Digit row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Sentinel ---------------------------------------------------------

    /// Any platform key outside the table above.
    ///
    /// Delivered like every other key so the simulation sees the exact
    /// transition sequence, but bound to no action.
    Unidentified,
}

impl KeyCode {
    /// Returns true for the no-op sentinel.
    pub fn is_unidentified(self) -> bool {
        matches!(self, KeyCode::Unidentified)
    }
}

//=== InputEvent ==========================================================

/// A single key transition observed by the OS event thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub kind: KeyKind,
    pub code: KeyCode,
}

impl InputEvent {
    pub fn new(kind: KeyKind, code: KeyCode) -> Self {
        Self { kind, code }
    }

    pub fn key_down(code: KeyCode) -> Self {
        Self::new(KeyKind::Down, code)
    }

    pub fn key_up(code: KeyCode) -> Self {
        Self::new(KeyKind::Up, code)
    }

    pub fn is_down(&self) -> bool {
        self.kind == KeyKind::Down
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
