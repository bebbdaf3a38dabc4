//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Runs the game logic on its own thread at a fixed tick rate.
//
// Responsibilities:
// - Collect platform input batches without blocking
// - Measure the real tick rate and derive the per-tick delta
// - Tick the state stack and record the frame it draws
// - Hand frames to the platform, dropping them when it falls behind
//
// Communication with the platform happens only through crossbeam
// channels; the core owns every state and the shared context.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod error;
pub mod globals;
pub mod input;
pub(crate) mod platform_bridge;
pub mod render;
pub mod state;
pub mod tick_clock;
pub mod ui;
pub mod world;

//=== External Dependencies ===============================================

use std::error::Error as _;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::*;

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use error::StateError;
use globals::{GameContext, GameSystems};
use platform_bridge::{CoreEvent, EventCollector, PlatformEvent, TickControl};
use tick_clock::TickClock;

//=== CoreSystemsOrchestrator =============================================

/// Owns the systems and context until the core thread takes them over.
pub(crate) struct CoreSystemsOrchestrator {
    systems: GameSystems,
    context: GameContext,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(config: Arc<GameConfig>) -> Self {
        Self {
            systems: GameSystems::new(),
            context: GameContext::new(config),
        }
    }

    /// Gives setup code access to the systems before the thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GameSystems, &mut GameContext),
    {
        init_fn(&mut self.systems, &mut self.context);
    }

    //--- Execution --------------------------------------------------------

    /// Spawns the logic thread.
    ///
    /// Each tick:
    ///  1. Drains platform events (exits on close/disconnect)
    ///  2. Updates the tick delta from the measured rate
    ///  3. Ticks the state stack
    ///  4. Records and sends the frame
    ///  5. Sleeps out the rest of the tick
    ///
    /// A state error is logged with its full cause chain, the platform
    /// is told to shut down, and the thread ends.
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        frames: Sender<CoreEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let tick_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let Self { mut systems, mut context } = self;
            let mut collector = EventCollector::new(receiver);
            let mut clock = TickClock::new();
            let (width, height) = (context.config.window.width, context.config.window.height);

            info!(target: "core", "Core thread started at {} TPS", tps);

            loop {
                let tick_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!(target: "core", "Core thread exiting");
                    break;
                }

                //--- Step 2: Tick delta ------------------------------------
                context.delta = clock.tick();

                //--- Step 3: Update states ---------------------------------
                if let Err(err) = systems.update(&mut context, collector.batches()) {
                    log_state_error(&err);
                    let _ = frames.send(CoreEvent::Shutdown);
                    break;
                }

                //--- Step 4: Present ---------------------------------------
                match frames.try_send(CoreEvent::Frame(systems.render(width, height))) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        trace!(target: "core", "Platform behind, frame dropped");
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        info!(target: "core", "Platform gone, core thread exiting");
                        break;
                    }
                }

                //--- Step 5: Fixed pacing ----------------------------------
                let elapsed = tick_start.elapsed();
                if elapsed < tick_duration {
                    thread::sleep(tick_duration - elapsed);
                }
            }
        })
    }
}

fn log_state_error(err: &StateError) {
    error!(target: "core", "{}", err);

    let mut source = err.source();
    while let Some(cause) = source {
        error!(target: "core", "  caused by: {}", cause);
        source = cause.source();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::UpdateError;
    use crate::core::render::{Color, Surface};
    use crate::core::state::{GameState, Underlay};
    use crossbeam_channel::{bounded, unbounded};

    struct Blank;

    impl GameState for Blank {
        fn update(&mut self, _ctx: &mut GameContext) -> Result<(), UpdateError> {
            Ok(())
        }

        fn draw(&self, surface: &mut dyn Surface, _below: Underlay<'_>) {
            surface.clear(Color::BLACK);
        }

        fn id(&self) -> &'static str {
            "Blank"
        }
    }

    struct Broken;

    impl GameState for Broken {
        fn update(&mut self, _ctx: &mut GameContext) -> Result<(), UpdateError> {
            Err(UpdateError::Failed("boom".to_string()))
        }

        fn draw(&self, _surface: &mut dyn Surface, _below: Underlay<'_>) {}

        fn id(&self) -> &'static str {
            "Broken"
        }
    }

    fn orchestrator_with(state: impl GameState + 'static) -> CoreSystemsOrchestrator {
        let mut core = CoreSystemsOrchestrator::new(Arc::new(GameConfig::default()));
        core.init_systems(|systems, ctx| systems.start_with(ctx, state));
        core
    }

    #[test]
    fn core_sends_frames_until_window_closes() {
        let (event_tx, event_rx) = unbounded();
        let (frame_tx, frame_rx) = bounded(4);

        let handle = orchestrator_with(Blank).spawn_core_thread(event_rx, frame_tx, 240.0);

        match frame_rx.recv_timeout(Duration::from_secs(2)) {
            Ok(CoreEvent::Frame(frame)) => assert_eq!(frame.size(), (1280, 720)),
            other => panic!("Expected a frame, got {:?}", other),
        }

        event_tx.send(PlatformEvent::WindowClosed).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn state_error_requests_shutdown() {
        let (_event_tx, event_rx) = unbounded();
        let (frame_tx, frame_rx) = unbounded();

        let handle = orchestrator_with(Broken).spawn_core_thread(event_rx, frame_tx, 240.0);
        handle.join().unwrap();

        let events: Vec<_> = frame_rx.try_iter().collect();
        assert!(matches!(events.last(), Some(CoreEvent::Shutdown)));
    }

    #[test]
    fn core_exits_when_platform_disconnects() {
        let (event_tx, event_rx) = unbounded::<PlatformEvent>();
        let (frame_tx, _frame_rx) = bounded(1);
        drop(event_tx);

        let handle = orchestrator_with(Blank).spawn_core_thread(event_rx, frame_tx, 240.0);
        handle.join().unwrap();
    }
}
