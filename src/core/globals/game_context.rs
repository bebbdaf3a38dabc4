//=========================================================================
// Game Context
//=========================================================================
//
// Shared data container for states.
//
// Contains data that state hooks read/write:
// - input: per-tick keyboard and pointer sample
// - bindings: action → keys table
// - transitions: queue for state stack changes
// - assets: background-loaded image registry
// - config: immutable settings
// - delta: elapsed seconds for the current tick
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::core::assets::AssetManager;
use crate::core::input::{Action, KeyBindings, StateTracker};
use crate::core::state::TransitionQueue;
use crate::core::tick_clock::FALLBACK_DELTA;

//=== GameContext =========================================================

/// Shared context handed to every state hook.
pub struct GameContext {
    /// Input sample for the current tick. Written only by the core loop.
    pub input: StateTracker,

    pub bindings: KeyBindings,

    /// States queue stack changes here; the manager applies one per tick.
    pub transitions: TransitionQueue,

    pub assets: AssetManager,

    pub config: Arc<GameConfig>,

    /// Seconds elapsed this tick, derived from the measured tick rate.
    pub delta: f64,
}

impl GameContext {
    /// Fresh context with default bindings patched by the config overrides.
    pub fn new(config: Arc<GameConfig>) -> Self {
        let mut bindings = KeyBindings::default();
        bindings.apply_overrides(&config.bindings);

        Self {
            input: StateTracker::new(),
            bindings,
            transitions: TransitionQueue::new(),
            assets: AssetManager::new(),
            config,
            delta: FALLBACK_DELTA,
        }
    }

    //--- Input Shortcuts --------------------------------------------------

    /// Any key bound to `action` is held.
    pub fn is_down(&self, action: Action) -> bool {
        self.bindings.is_down(action, &self.input)
    }

    /// Any key bound to `action` went down this tick.
    pub fn is_pressed(&self, action: Action) -> bool {
        self.bindings.is_pressed(action, &self.input)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use std::collections::HashMap;

    #[test]
    fn config_overrides_reach_bindings() {
        let config = GameConfig {
            bindings: HashMap::from([(Action::Pause, vec![KeyCode::KeyP])]),
            ..GameConfig::default()
        };
        let mut ctx = GameContext::new(Arc::new(config));

        ctx.input.process_events(&[InputEvent::KeyDown(KeyCode::KeyP)]);
        assert!(ctx.is_pressed(Action::Pause));

        ctx.input.begin_frame();
        ctx.input.process_events(&[InputEvent::KeyDown(KeyCode::Escape)]);
        assert!(!ctx.is_pressed(Action::Pause));
    }

    #[test]
    fn starts_with_fallback_delta() {
        let ctx = GameContext::new(Arc::new(GameConfig::default()));
        assert_eq!(ctx.delta, FALLBACK_DELTA);
        assert!(ctx.transitions.is_empty());
    }
}
