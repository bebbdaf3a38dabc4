//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use tilebound::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::config::GameConfig;
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Context and systems
pub use crate::core::globals::{GameContext, GameSystems};

// States
pub use crate::core::error::{InitError, StateError, UpdateError};
pub use crate::core::state::{GameState, StateManager, Transition, Underlay};

// Input
pub use crate::core::input::{Action, InputEvent, KeyCode, MouseButton};

// Rendering
pub use crate::core::render::{Color, DrawCommand, DrawList, Rect, Surface};
