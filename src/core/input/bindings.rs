//=========================================================================
// Key Bindings
//=========================================================================
//
// Maps game actions to the physical keys that trigger them.
//
// Architecture:
//   Action → HashMap → [KeyCode] → StateTracker query (held / pressed)
//
// An action is down if ANY of its keys is down, and pressed if ANY of
// its keys went down this tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;
use super::state_tracker::StateTracker;

//=== Action ==============================================================

/// High-level commands the states react to.
///
/// Config keys use snake_case (`move_up`, `navigate_down`, `pause`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NavigateUp,
    NavigateDown,
    Confirm,
    Pause,
}

//=== KeyBindings =========================================================

/// Action → keys lookup table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<Action, Vec<KeyCode>>,
}

impl KeyBindings {
    /// Creates a table with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Adds `key` as a trigger for `action` (duplicates are ignored).
    pub fn bind(&mut self, action: Action, key: KeyCode) {
        let keys = self.bindings.entry(action).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    /// Removes every key bound to `action`.
    pub fn unbind_all(&mut self, action: Action) {
        self.bindings.remove(&action);
    }

    /// Replaces the keys of each listed action, leaving the rest untouched.
    pub fn apply_overrides(&mut self, overrides: &HashMap<Action, Vec<KeyCode>>) {
        for (&action, keys) in overrides {
            self.unbind_all(action);
            for &key in keys {
                self.bind(action, key);
            }
        }
    }

    /// Keys currently bound to `action`.
    pub fn keys(&self, action: Action) -> &[KeyCode] {
        self.bindings
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` while any key bound to `action` is held.
    pub fn is_down(&self, action: Action, input: &StateTracker) -> bool {
        self.keys(action).iter().any(|&key| input.is_key_down(key))
    }

    /// Returns `true` if any key bound to `action` went down this tick.
    pub fn is_pressed(&self, action: Action, input: &StateTracker) -> bool {
        self.keys(action).iter().any(|&key| input.is_key_pressed(key))
    }
}

impl Default for KeyBindings {
    /// WASD + arrows for movement, arrows for menu navigation,
    /// Enter/Space to confirm, Escape to pause.
    fn default() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(Action::MoveUp, KeyCode::KeyW);
        bindings.bind(Action::MoveUp, KeyCode::ArrowUp);
        bindings.bind(Action::MoveDown, KeyCode::KeyS);
        bindings.bind(Action::MoveDown, KeyCode::ArrowDown);
        bindings.bind(Action::MoveLeft, KeyCode::KeyA);
        bindings.bind(Action::MoveLeft, KeyCode::ArrowLeft);
        bindings.bind(Action::MoveRight, KeyCode::KeyD);
        bindings.bind(Action::MoveRight, KeyCode::ArrowRight);

        bindings.bind(Action::NavigateUp, KeyCode::ArrowUp);
        bindings.bind(Action::NavigateDown, KeyCode::ArrowDown);
        bindings.bind(Action::Confirm, KeyCode::Enter);
        bindings.bind(Action::Confirm, KeyCode::Space);
        bindings.bind(Action::Pause, KeyCode::Escape);

        bindings
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
