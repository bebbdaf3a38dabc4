//=========================================================================
// Input System
//=========================================================================
//
// Engine-side input handling.
//
// Architecture:
//   InputEvent (platform) → StateTracker (per-tick sample)
//                                ↓
//   KeyBindings ─────────→ Action queries used by states
//
//=========================================================================

//=== Module Declarations =================================================

mod bindings;
pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use bindings::{Action, KeyBindings};
pub use event::{InputEvent, KeyCode, MouseButton};
pub use state_tracker::StateTracker;
