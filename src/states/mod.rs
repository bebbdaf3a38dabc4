//=========================================================================
// Game States
//=========================================================================
//
// The four modes of the game and the flow between them.
//
//   Loading ──Replace──→ MainMenu ──Replace──→ Gameplay
//                           ↑                    │ Push
//                           └──Replace── PauseMenu ←┘
//                                        │ Pop
//                                        └──→ Gameplay (resumed)
//
// Shared asset identifiers live here so every state agrees on them.
//
//=========================================================================

//=== Module Declarations =================================================

mod gameplay;
mod loading;
mod menu;
mod pause;

//=== Public API ==========================================================

pub use gameplay::GameplayState;
pub use loading::LoadingState;
pub use menu::{camera_offset, MenuAction, MenuState};
pub use pause::{PauseAction, PauseState};

//=== Asset Identifiers ===================================================

pub const LOGO: &str = "logo";
pub const WORLD_BACKGROUND: &str = "world_background";
pub const PLAYER_SHEET: &str = "player_sheet";

//=== Process Exit ========================================================

/// Terminates the process at once. No `exit` hook runs first.
pub(crate) fn exit_process(code: i32) -> ! {
    log::info!(target: "state", "Exit requested, terminating with code {}", code);
    std::process::exit(code)
}
