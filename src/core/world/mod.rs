//=========================================================================
// World Simulation
//=========================================================================
//
// Tile collision, movement resolution and idle animation for the
// gameplay state.
//
// Architecture:
//   MoveIntent → resolve_movement() ──→ TileGrid (Collision)
//   is_moving  → AnimationClock::advance() → AnimationState
//
//=========================================================================

//=== Module Declarations =================================================

mod animation;
mod movement;
mod tile_grid;

//=== Public API ==========================================================

pub use animation::{AnimationClock, AnimationState};
pub use movement::{resolve_movement, MoveIntent};
pub use tile_grid::{Collision, Tile, TileGrid};
