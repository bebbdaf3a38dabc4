//=========================================================================
// State System
//=========================================================================
//
// Stack of polymorphic game states driven by deferred transitions.
//
// Architecture:
//   StateManager
//     └─ stack: Vec<Box<dyn GameState>>   (last = active)
//   GameContext.transitions: TransitionQueue (FIFO, one applied per tick)
//
// Flow (per tick):
//   take_next() → apply → top.handle_input() → top.update()
//   draw(): top.draw(surface, Underlay(states below))
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::{InitError, UpdateError};
use crate::core::globals::GameContext;
use crate::core::render::Surface;

//=== Module Declarations =================================================

mod state_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use state_manager::StateManager;
pub use transition_queue::{Transition, TransitionKind, TransitionQueue};

//=== GameState Trait =====================================================

/// One mode of the application's control flow (menu, gameplay, ...).
///
/// Hooks are called only by the [`StateManager`]. A state requests stack
/// changes through `ctx.transitions`; they are applied on a later tick,
/// never while the requesting hook is running.
///
/// # Minimal Implementation
///
/// ```rust
/// # use tilebound::prelude::*;
/// struct Splash;
///
/// impl GameState for Splash {
///     fn update(&mut self, _ctx: &mut GameContext) -> Result<(), UpdateError> {
///         Ok(())
///     }
///
///     fn draw(&self, surface: &mut dyn Surface, _below: Underlay<'_>) {
///         surface.clear(Color::BLACK);
///     }
///
///     fn id(&self) -> &'static str {
///         "Splash"
///     }
/// }
/// ```
pub trait GameState: Send {
    /// Called once, right before the state is first added to the stack.
    fn initialize(&mut self, _ctx: &mut GameContext) -> Result<(), InitError> {
        Ok(())
    }

    /// Called every time the state becomes the top of the stack.
    fn enter(&mut self, _ctx: &mut GameContext) {}

    /// Called every time the state stops being the top of the stack.
    fn exit(&mut self, _ctx: &mut GameContext) {}

    /// Called before [`update`](Self::update) on the active state.
    fn handle_input(&mut self, _ctx: &mut GameContext) -> Result<(), UpdateError> {
        Ok(())
    }

    /// Advances one tick of state-local logic (`ctx.delta` seconds).
    fn update(&mut self, ctx: &mut GameContext) -> Result<(), UpdateError>;

    /// Renders the state. `below` gives access to the states beneath it.
    fn draw(&self, surface: &mut dyn Surface, below: Underlay<'_>);

    /// Stable identifier for diagnostics.
    fn id(&self) -> &'static str;
}

//=== Underlay ============================================================

/// Read-only view of the states beneath the one being drawn.
#[derive(Clone, Copy)]
pub struct Underlay<'a> {
    states: &'a [Box<dyn GameState>],
}

impl<'a> Underlay<'a> {
    pub(crate) fn new(states: &'a [Box<dyn GameState>]) -> Self {
        Self { states }
    }

    /// A view with nothing underneath.
    pub fn empty() -> Self {
        Self { states: &[] }
    }

    /// Draws the state directly beneath (which may delegate further).
    ///
    /// Returns `false` if there is nothing to draw.
    pub fn draw(&self, surface: &mut dyn Surface) -> bool {
        match self.states.split_last() {
            Some((top, rest)) => {
                top.draw(surface, Underlay::new(rest));
                true
            }
            None => false,
        }
    }
}
