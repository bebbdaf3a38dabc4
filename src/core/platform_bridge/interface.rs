//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages crossing the platform ↔ core thread boundary, plus platform
// errors.
//
//   platform ──PlatformEvent──→ core      (input batches, close)
//   platform ←──CoreEvent────── core      (frames, shutdown)
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::DrawList;

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input gathered since the previous frame boundary.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Events sent from core to platform.
#[derive(Debug, Clone)]
pub(crate) enum CoreEvent {
    /// A finished frame to present.
    Frame(DrawList),

    /// The core loop stopped (error or close); the window should close.
    Shutdown,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(String),
}
