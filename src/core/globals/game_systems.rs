//=========================================================================
// Game Systems
//=========================================================================
//
// Container for the logic systems the core loop drives each tick.
//
// Systems operate on GameContext data.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GameContext;
use crate::core::error::StateError;
use crate::core::input::InputEvent;
use crate::core::render::DrawList;
use crate::core::state::{GameState, StateManager};

//=== GameSystems =========================================================

pub struct GameSystems {
    /// Stack of game states and their lifecycle.
    pub states: StateManager,
}

impl GameSystems {
    pub fn new() -> Self {
        Self {
            states: StateManager::new(),
        }
    }

    /// Queues `state` as the first state; it starts on the first tick.
    pub fn start_with(&mut self, ctx: &mut GameContext, state: impl GameState + 'static) {
        ctx.transitions.request_push(state);
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input**: drop last tick's edges, apply this tick's batches
    /// 2. **States**: one transition, then input + update on the top
    pub fn update(&mut self, ctx: &mut GameContext, batches: &[Vec<InputEvent>]) -> Result<(), StateError> {
        ctx.input.begin_frame();
        for batch in batches {
            ctx.input.process_events(batch);
        }

        self.states.tick(ctx)
    }

    /// Records the active state's frame.
    pub fn render(&self, width: u32, height: u32) -> DrawList {
        let mut frame = DrawList::new(width, height);
        self.states.draw(&mut frame);
        frame
    }
}

impl Default for GameSystems {
    fn default() -> Self {
        Self::new()
    }
}
