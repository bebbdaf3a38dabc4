//=========================================================================
// Engine
//=========================================================================
//
// Main entry point: wires the core thread and the platform together.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_config()           ├─ init(): queue the first state
//         ├─ with_tps()              └─ run(): spawn core thread,
//         └─ with_channel_capacity()           run platform, join
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use crossbeam_channel::bounded;
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::core::globals::{GameContext, GameSystems};
use crate::core::platform_bridge::{CoreEvent, PlatformEvent};
use crate::core::CoreSystemsOrchestrator;
use crate::platform::Platform;

pub use crate::core::platform_bridge::PlatformError;

//=== Constants ===========================================================

/// Frames the core may queue ahead of the platform before dropping.
const FRAME_QUEUE: usize = 2;

//=== EngineError =========================================================

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("core thread panicked")]
    CorePanicked,
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// Starts from [`GameConfig::default`]. Explicit `with_tps` and
/// `with_channel_capacity` calls override the config's `timing` section,
/// so call them after [`with_config`](Self::with_config).
///
/// # Examples
///
/// ```no_run
/// use tilebound::config::GameConfig;
/// use tilebound::states::{LoadingState, MenuState};
/// use tilebound::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_config(GameConfig::default())
///     .with_tps(120.0)
///     .build()
///     .init(|systems, ctx| systems.start_with(ctx, LoadingState::new(MenuState::new())))
///     .run()?;
/// # Ok::<(), tilebound::EngineError>(())
/// ```
pub struct EngineBuilder {
    config: GameConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the target ticks per second for the core thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.timing.tps = tps;
        self
    }

    /// Sets the platform → core channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.timing.channel_capacity = capacity;
        self
    }

    pub fn build(self) -> Engine {
        let timing = &self.config.timing;
        info!(
            "Building engine (TPS: {}, channel: {})",
            timing.tps, timing.channel_capacity
        );

        let config = Arc::new(self.config);
        Engine {
            orchestrator: CoreSystemsOrchestrator::new(Arc::clone(&config)),
            config,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Runtime: a core thread at the configured TPS plus the platform event
/// loop on the calling thread.
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    config: Arc<GameConfig>,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures systems before the runtime starts, typically by queueing
    /// the first state with [`GameSystems::start_with`].
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GameSystems, &mut GameContext),
    {
        info!("Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes or the core stops.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform ⇄ core channels
    /// 2. Spawns the core thread
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Joins the core thread
    ///
    /// # Errors
    ///
    /// Returns the platform error if the event loop failed, otherwise
    /// [`EngineError::CorePanicked`] if the core thread panicked.
    pub fn run(self) -> Result<(), EngineError> {
        let timing = &self.config.timing;
        info!("Starting engine runtime (TPS: {})", timing.tps);

        //--- 1. Communication channels ------------------------------------
        let (event_tx, event_rx) = bounded::<PlatformEvent>(timing.channel_capacity);
        let (frame_tx, frame_rx) = bounded::<CoreEvent>(FRAME_QUEUE);

        //--- 2. Core thread -----------------------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(event_rx, frame_tx, timing.tps);
        info!("Core logic thread spawned");

        //--- 3. Platform --------------------------------------------------
        let platform = Platform::new(event_tx, frame_rx, self.config.window.clone());
        let platform_result = platform.run();
        info!("Platform event loop exited");

        //--- 4. Cleanup ---------------------------------------------------
        // The platform's sender is gone by now, so the core loop ends on
        // its next tick
        let core_result = core_handle.join();

        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }
        platform_result?;

        match core_result {
            Ok(()) => {
                info!("Engine shutdown complete");
                Ok(())
            }
            Err(_) => {
                error!("Core thread panicked");
                Err(EngineError::CorePanicked)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults_come_from_config() {
        let engine = EngineBuilder::new().build();
        assert_eq!(engine.config().timing.tps, 60.0);
        assert_eq!(engine.config().timing.channel_capacity, 128);
    }

    #[test]
    fn explicit_values_override_config() {
        let mut config = GameConfig::default();
        config.timing.tps = 30.0;

        let engine = EngineBuilder::new()
            .with_config(config)
            .with_tps(120.0)
            .with_channel_capacity(256)
            .build();

        assert_eq!(engine.config().timing.tps, 120.0);
        assert_eq!(engine.config().timing.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn init_runs_setup_closure() {
        let mut called = false;
        let _engine = EngineBuilder::new().build().init(|systems, ctx| {
            assert!(systems.states.is_empty());
            assert!(ctx.transitions.is_empty());
            called = true;
        });
        assert!(called);
    }
}
