//=========================================================================
// Tilebound — Library Root
//=========================================================================
//
// A small top-down tile game: a player walking a walled world, wrapped
// in a loading screen, a main menu and a pause overlay.
//
// Module map:
// - `core`: tick loop, state stack, world rules, input, assets, UI
// - `states`: the Loading / Menu / Gameplay / Pause states
// - `config`: TOML settings
// - `platform` (private): winit window, pixels presentation
//
// Typical usage:
// ```no_run
// use tilebound::states::{LoadingState, MenuState};
// use tilebound::EngineBuilder;
//
// EngineBuilder::new()
//     .build()
//     .init(|systems, ctx| systems.start_with(ctx, LoadingState::new(MenuState::new())))
//     .run()
//     .ok();
// ```
//
//=========================================================================

//=== Public Modules ======================================================

pub mod config;
pub mod core;
pub mod prelude;
pub mod states;

//=== Internal Modules ====================================================

mod engine;
mod platform;

//=== Public Exports ======================================================

pub use engine::{Engine, EngineBuilder, EngineError, PlatformError};
