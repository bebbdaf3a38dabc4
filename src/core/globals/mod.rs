//=========================================================================
// Global Game State
//=========================================================================
//
// Separates systems (logic components) from context (shared data).
//
// Architecture:
//   GameSystems: StateManager (owned by orchestrator)
//   GameContext: StateTracker + KeyBindings + TransitionQueue + assets
//                + config + tick delta (passed to states)
//
//=========================================================================

//=== Module Declarations =================================================

mod game_context;
mod game_systems;

//=== Public API ==========================================================

pub use game_context::GameContext;
pub use game_systems::GameSystems;
