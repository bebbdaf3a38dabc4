//=========================================================================
// Transition Queue
//=========================================================================
//
// FIFO of pending stack changes.
//
// States queue transitions here during their hooks. The state manager
// takes exactly one per tick, so at most one Initialize/Enter/Exit group
// is observable per tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::fmt;

//=== Internal Dependencies ===============================================

use super::GameState;

//=== Transition ==========================================================

/// A requested change to the state stack.
pub enum Transition {
    /// Exit the top, then initialize and enter the new state above it.
    Push(Box<dyn GameState>),

    /// Exit and remove the top, then enter the state uncovered below.
    Pop,

    /// Exit and remove only the top, then initialize and enter the new one.
    Replace(Box<dyn GameState>),

    /// Exit every state top to bottom; optionally start over with one.
    Clear(Option<Box<dyn GameState>>),
}

/// Payload-free discriminant of a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Push,
    Pop,
    Replace,
    Clear,
}

impl Transition {
    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::Push(_) => TransitionKind::Push,
            Self::Pop => TransitionKind::Pop,
            Self::Replace(_) => TransitionKind::Replace,
            Self::Clear(_) => TransitionKind::Clear,
        }
    }

    /// Identifier of the carried state, if any.
    pub fn target_id(&self) -> Option<&'static str> {
        match self {
            Self::Push(state) | Self::Replace(state) | Self::Clear(Some(state)) => Some(state.id()),
            Self::Pop | Self::Clear(None) => None,
        }
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target_id() {
            Some(id) => write!(f, "{:?}({})", self.kind(), id),
            None => write!(f, "{:?}", self.kind()),
        }
    }
}

//=== TransitionQueue =====================================================

#[derive(Default)]
pub struct TransitionQueue {
    queue: VecDeque<Transition>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Requests ---------------------------------------------------------

    /// Queues a transition to be applied on a later tick.
    pub fn request(&mut self, transition: Transition) {
        self.queue.push_back(transition);
    }

    pub fn request_push(&mut self, state: impl GameState + 'static) {
        self.request(Transition::Push(Box::new(state)));
    }

    pub fn request_pop(&mut self) {
        self.request(Transition::Pop);
    }

    pub fn request_replace(&mut self, state: impl GameState + 'static) {
        self.request(Transition::Replace(Box::new(state)));
    }

    pub fn request_clear(&mut self, state: Option<Box<dyn GameState>>) {
        self.request(Transition::Clear(state));
    }

    //--- Consumption ------------------------------------------------------

    /// Removes the oldest pending transition.
    pub fn take_next(&mut self) -> Option<Transition> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Pending kinds, oldest first.
    pub fn kinds(&self) -> Vec<TransitionKind> {
        self.queue.iter().map(Transition::kind).collect()
    }
}

impl fmt::Debug for TransitionQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.queue.iter()).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::UpdateError;
    use crate::core::globals::GameContext;
    use crate::core::render::Surface;
    use crate::core::state::Underlay;

    struct Named(&'static str);

    impl GameState for Named {
        fn update(&mut self, _ctx: &mut GameContext) -> Result<(), UpdateError> {
            Ok(())
        }
        fn draw(&self, _surface: &mut dyn Surface, _below: Underlay<'_>) {}
        fn id(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn requests_are_fifo() {
        let mut queue = TransitionQueue::new();
        queue.request_push(Named("A"));
        queue.request_pop();
        queue.request_replace(Named("B"));
        queue.request_clear(None);

        assert_eq!(
            queue.kinds(),
            vec![
                TransitionKind::Push,
                TransitionKind::Pop,
                TransitionKind::Replace,
                TransitionKind::Clear
            ]
        );

        assert_eq!(queue.take_next().and_then(|t| t.target_id()), Some("A"));
        assert_eq!(queue.take_next().map(|t| t.kind()), Some(TransitionKind::Pop));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn debug_shows_kind_and_target() {
        let mut queue = TransitionQueue::new();
        queue.request_push(Named("Gameplay"));
        queue.request_pop();

        assert_eq!(format!("{queue:?}"), "[Push(Gameplay), Pop]");
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let mut queue = TransitionQueue::new();
        assert!(queue.take_next().is_none());
        assert!(queue.is_empty());
    }
}
