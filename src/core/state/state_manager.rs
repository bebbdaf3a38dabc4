//=========================================================================
// State Manager
//=========================================================================
//
// Owns the state stack and applies queued transitions.
//
// Each tick applies at most ONE pending transition, then forwards input
// and update to the top state. Only the top state is drawn; it reaches
// the states beneath through its Underlay.
//
// Pop on an empty stack is a silent no-op; Replace on an empty stack
// pushes.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{GameState, Transition, Underlay};
use crate::core::error::StateError;
use crate::core::globals::GameContext;
use crate::core::render::Surface;

//=== StateManager ========================================================

#[derive(Default)]
pub struct StateManager {
    stack: Vec<Box<dyn GameState>>,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Inspection -------------------------------------------------------

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Identifier of the active state.
    pub fn top_id(&self) -> Option<&'static str> {
        self.stack.last().map(|state| state.id())
    }

    /// Identifiers bottom to top.
    pub fn ids(&self) -> Vec<&'static str> {
        self.stack.iter().map(|state| state.id()).collect()
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one manager tick.
    ///
    /// 1. Applies the oldest pending transition, if any.
    /// 2. Calls `handle_input` then `update` on the top state.
    ///
    /// An empty stack makes this a no-op.
    ///
    /// # Errors
    ///
    /// Returns the first initialization or update failure. Nothing is
    /// rolled back; the caller decides whether to halt.
    pub fn tick(&mut self, ctx: &mut GameContext) -> Result<(), StateError> {
        if let Some(transition) = ctx.transitions.take_next() {
            self.apply(transition, ctx)?;
        }

        let Some(top) = self.stack.last_mut() else {
            return Ok(());
        };

        let state = top.id();
        top.handle_input(ctx)
            .and_then(|()| top.update(ctx))
            .map_err(|source| StateError::Update { state, source })
    }

    /// Draws the top state, handing it a view of the states below.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some((top, below)) = self.stack.split_last() {
            top.draw(surface, Underlay::new(below));
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply(&mut self, transition: Transition, ctx: &mut GameContext) -> Result<(), StateError> {
        debug!(target: "state", "Applying {:?} to {:?}", transition, self.ids());

        match transition {
            Transition::Push(state) => {
                if let Some(top) = self.stack.last_mut() {
                    top.exit(ctx);
                }
                self.start(state, ctx)?;
            }

            Transition::Pop => {
                let Some(mut top) = self.stack.pop() else {
                    debug!(target: "state", "Pop on empty stack ignored");
                    return Ok(());
                };
                top.exit(ctx);

                if let Some(uncovered) = self.stack.last_mut() {
                    uncovered.enter(ctx);
                }
            }

            Transition::Replace(state) => {
                match self.stack.pop() {
                    Some(mut top) => top.exit(ctx),
                    None => debug!(target: "state", "Replace on empty stack acts as push"),
                }
                self.start(state, ctx)?;
            }

            Transition::Clear(state) => {
                while let Some(mut top) = self.stack.pop() {
                    top.exit(ctx);
                }
                if let Some(state) = state {
                    self.start(state, ctx)?;
                }
            }
        }

        Ok(())
    }

    /// Initializes, enters and pushes a newly created state.
    fn start(&mut self, mut state: Box<dyn GameState>, ctx: &mut GameContext) -> Result<(), StateError> {
        let id = state.id();
        state
            .initialize(ctx)
            .map_err(|source| StateError::Init { state: id, source })?;
        state.enter(ctx);
        self.stack.push(state);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
