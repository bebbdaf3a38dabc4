//=========================================================================
// Event Collector
//=========================================================================
//
// Drains the platform channel once per tick into input batches for the
// state tracker.
//
// At most EVENT_BUDGET platform messages are taken per tick; anything
// beyond waits for the next tick. A closed window or a dropped sender
// stops the core loop.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const EVENT_BUDGET: usize = 100;

//=== TickControl =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            batches: Vec::new(),
        }
    }

    /// Replaces last tick's batches with whatever the platform sent since.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.batches.clear();

        for _ in 0..EVENT_BUDGET {
            let inputs = match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs { discrete, continuous }) => [discrete, continuous],
                Ok(PlatformEvent::WindowClosed) | Err(TryRecvError::Disconnected) => {
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => return TickControl::Continue,
            };
            self.batches
                .extend(inputs.into_iter().filter(|batch| !batch.is_empty()));
        }

        warn!(
            target: "core",
            "Input backlog: took {} platform messages this tick, rest deferred",
            EVENT_BUDGET
        );
        TickControl::Continue
    }

    /// Batches gathered by the last [`collect_frame`](Self::collect_frame).
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.batches
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton};
    use crossbeam_channel::unbounded;

    fn keys(keys: &[KeyCode]) -> PlatformEvent {
        PlatformEvent::Inputs {
            discrete: keys.iter().copied().map(InputEvent::KeyDown).collect(),
            continuous: Vec::new(),
        }
    }

    #[test]
    fn quiet_channel_continues_with_no_batches() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn pointer_motion_follows_discrete_events() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::MouseButtonDown(MouseButton::Left)],
            continuous: vec![InputEvent::MouseMoved { x: 3.0, y: 4.0 }],
        })
        .unwrap();
        tx.send(keys(&[KeyCode::KeyW, KeyCode::KeyD])).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(
            collector.batches(),
            &[
                vec![InputEvent::MouseButtonDown(MouseButton::Left)],
                vec![InputEvent::MouseMoved { x: 3.0, y: 4.0 }],
                vec![InputEvent::KeyDown(KeyCode::KeyW), InputEvent::KeyDown(KeyCode::KeyD)],
            ]
        );
    }

    #[test]
    fn batches_only_cover_the_latest_tick() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(keys(&[KeyCode::Space])).unwrap();
        collector.collect_frame();
        assert_eq!(collector.batches().len(), 1);

        collector.collect_frame();
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn backlog_beyond_budget_waits_for_next_tick() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..EVENT_BUDGET + 5 {
            tx.send(keys(&[KeyCode::Enter])).unwrap();
        }

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.batches().len(), EVENT_BUDGET);

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 5);
    }

    #[test]
    fn window_close_stops_the_loop() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(keys(&[KeyCode::KeyA])).unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn dropped_sender_stops_the_loop() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
