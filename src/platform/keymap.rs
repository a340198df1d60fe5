//=========================================================================
// Key Map
//=========================================================================
//
// Fixed translation table from Winit physical keys to engine key codes.
//
// Architecture:
//   winit PhysicalKey → translate_key() → KeyCode → EventQueue
//
// Left/right variants of a modifier collapse to one engine key. Every
// physical key outside the table, and every key the OS reports without a
// code, becomes `KeyCode::Unidentified`.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::ElementState;
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, KeyKind};

//=== Translation =========================================================

/// Translates a platform key into the engine key space.
pub(crate) fn translate_key(physical_key: PhysicalKey) -> KeyCode {
    match physical_key {
        PhysicalKey::Code(code) => KeyCode::from(code),
        PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
    }
}

/// Maps a Winit press/release state to a transition kind.
pub(crate) fn translate_state(state: ElementState) -> KeyKind {
    match state {
        ElementState::Pressed => KeyKind::Down,
        ElementState::Released => KeyKind::Up,
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Navigation ---------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Escape => KeyCode::Escape,
            Enter | NumpadEnter => KeyCode::Enter,
            Tab => KeyCode::Tab,
            Space => KeyCode::Space,
            Backspace => KeyCode::Backspace,
            Pause => KeyCode::Pause,
            Minus | NumpadSubtract => KeyCode::Minus,
            Equal | NumpadAdd => KeyCode::Equals,
            Comma => KeyCode::Comma,
            Period => KeyCode::Period,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft | ShiftRight => KeyCode::Shift,
            ControlLeft | ControlRight => KeyCode::Ctrl,
            AltLeft | AltRight => KeyCode::Alt,

            //--- Function Keys ------------------------------------------------

            F1 => KeyCode::F1,
            F2 => KeyCode::F2,
            F3 => KeyCode::F3,
            F4 => KeyCode::F4,
            F5 => KeyCode::F5,
            F6 => KeyCode::F6,
            F7 => KeyCode::F7,
            F8 => KeyCode::F8,
            F9 => KeyCode::F9,
            F10 => KeyCode::F10,
            F11 => KeyCode::F11,
            F12 => KeyCode::F12,

            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Everything else ----------------------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn arrows_map_directly() {
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowUp), KeyCode::ArrowUp);
    }

    #[test]
    fn letters_and_digits_are_mapped() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit0), KeyCode::Digit0);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit9), KeyCode::Digit9);
    }

    #[test]
    fn modifier_sides_collapse() {
        assert_eq!(KeyCode::from(WinitKeyCode::ShiftLeft), KeyCode::Shift);
        assert_eq!(KeyCode::from(WinitKeyCode::ShiftRight), KeyCode::Shift);
        assert_eq!(KeyCode::from(WinitKeyCode::ControlRight), KeyCode::Ctrl);
        assert_eq!(KeyCode::from(WinitKeyCode::AltLeft), KeyCode::Alt);
    }

    #[test]
    fn unmapped_key_becomes_sentinel() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::MediaPlayPause), KeyCode::Unidentified);
    }

    #[test]
    fn unidentified_physical_key_becomes_sentinel() {
        let key = PhysicalKey::Unidentified(NativeKeyCode::Unidentified);
        assert_eq!(translate_key(key), KeyCode::Unidentified);
    }

    #[test]
    fn state_maps_to_kind() {
        assert_eq!(translate_state(ElementState::Pressed), KeyKind::Down);
        assert_eq!(translate_state(ElementState::Released), KeyKind::Up);
    }
}
