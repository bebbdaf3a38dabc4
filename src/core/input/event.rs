//=========================================================================
// Input Event Types
//=========================================================================
//
// Portable representation of keyboard and pointer input.
//
// The platform layer (winit) converts OS events into these types before
// they cross the thread boundary. Nothing in here depends on winit.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held / just pressed)
//         ↓
//    KeyBindings (game actions)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::Deserialize;

//=== MouseButton =========================================================

/// Physical pointer button identifier.
///
/// The `Other` variant covers side buttons and anything non-standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the produced character, so
/// `KeyW` stays the "up" key on AZERTY layouts as well.
///
/// Key names deserialize from their variant names (`"KeyW"`,
/// `"ArrowUp"`, `"Escape"`), which is how bindings are written in the
/// config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,

    /// Reported for keys the platform layer does not map.
    ///
    /// Events carrying this code are filtered before reaching the core.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event produced by the platform layer.
///
/// Pointer coordinates are in framebuffer space (pixels, top-left
/// origin), already mapped from window coordinates by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Pointer button pressed.
    MouseButtonDown(MouseButton),

    /// Pointer button released.
    MouseButtonUp(MouseButton),

    /// Pointer moved to a new position.
    MouseMoved { x: f32, y: f32 },
}

impl InputEvent {
    /// Returns `true` for pointer movement, which the platform coalesces
    /// (last position wins) instead of queueing every sample.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
