//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges winit (OS events) and pixels (presentation) with the core
// thread over crossbeam channels.
//
// Architecture:
// ```text
//  Main Thread:                       Core Thread:
//  ┌────────────────────────────┐    ┌───────────────────┐
//  │  winit event loop          │    │  GameSystems      │
//  │   ↓                        │    │   ↓               │
//  │  InputProcessor            │    │  StateManager     │
//  │   ↓                        │    │   ↓               │
//  │  InputBuffer ──flush───────┼───→│  (PlatformEvent)  │
//  │                            │    │   ↓               │
//  │  Framebuffer ←─replay──────┼────│  DrawList         │
//  │   ↓                        │    │  (CoreEvent)      │
//  │  pixels.render()           │    └───────────────────┘
//  └────────────────────────────┘
// ```
//
// Frame boundary is RedrawRequested: buffered input is flushed, the
// newest frame received from the core is presented, and the next redraw
// is requested. Older frames still queued are skipped.
//
// The pixel buffer has the configured logical size; pixels scales it to
// the window and maps cursor positions back into it.
//
//=========================================================================

//=== Module Declarations =================================================

mod input_buffer;
mod input_processor;
mod rasterizer;

//=== External Dependencies ===============================================

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::config::WindowConfig;
use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::core::render::DrawList;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;
use rasterizer::Framebuffer;

//=== Platform ============================================================

/// Window owner, input aggregator and frame presenter.
///
/// Must stay on the main thread (winit requirement on macOS/iOS). The
/// window and its pixel surface are created lazily in `resumed()`.
pub(crate) struct Platform {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    core_events: Receiver<CoreEvent>,
    input_processor: InputProcessor,
    config: WindowConfig,
    latest_frame: Option<DrawList>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        event_sender: Sender<PlatformEvent>,
        core_events: Receiver<CoreEvent>,
        config: WindowConfig,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            pixels: None,
            buffer: InputBuffer::new(),
            event_sender,
            core_events,
            input_processor: InputProcessor::new(),
            config,
            latest_frame: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Fails if the event loop cannot be created or aborts with an error.
    ///
    /// # Panics
    ///
    /// winit panics if this is called off the main thread on macOS/iOS.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the core thread.
    ///
    /// A disconnected channel (core already gone) drops the events with a
    /// warning so the window can still be closed normally.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let (discrete_count, continuous_count) = (discrete.len(), continuous.len());

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    discrete_count + continuous_count
                );
            }
        }
    }

    /// Keeps only the newest queued frame.
    ///
    /// Returns `true` once the core has shut down.
    fn drain_core_events(&mut self) -> bool {
        loop {
            match self.core_events.try_recv() {
                Ok(CoreEvent::Frame(frame)) => self.latest_frame = Some(frame),
                Ok(CoreEvent::Shutdown) => {
                    info!(target: "platform", "Core requested shutdown");
                    return true;
                }
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "platform", "Core channel disconnected");
                    return true;
                }
            }
        }
    }

    /// Rasterizes the newest frame and presents it.
    fn present(&mut self) -> Result<(), pixels::Error> {
        let (Some(pixels), Some(frame)) = (self.pixels.as_mut(), self.latest_frame.as_ref()) else {
            return Ok(());
        };

        let (width, height) = (self.config.width, self.config.height);
        match Framebuffer::new(pixels.frame_mut(), width, height) {
            Some(mut target) => frame.replay(&mut target),
            None => warn!(target: "platform", "Pixel buffer does not match {}x{}", width, height),
        }

        pixels.render()
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), String> {
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(event_loop.create_window(attrs).map_err(|e| e.to_string())?);
        let size = window.inner_size();

        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(self.config.width, self.config.height, surface)
            .map_err(|e| e.to_string())?;

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI, buffer {}x{}",
            size.width,
            size.height,
            window.scale_factor(),
            self.config.width,
            self.config.height
        );

        window.request_redraw();
        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            error!(target: "platform", "Window creation failed: {}", e);
            self.shutdown(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    if size.width > 0 && size.height > 0 {
                        if let Err(e) = pixels.resize_surface(size.width, size.height) {
                            error!(target: "platform", "Surface resize failed: {}", e);
                            self.shutdown(event_loop);
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let Some(pixels) = self.pixels.as_ref() else {
                    return;
                };
                let (x, y) = pixels
                    .window_pos_to_pixel((position.x as f32, position.y as f32))
                    .unwrap_or_else(|outside| pixels.clamp_pixel_pos(outside));

                let event = self.input_processor.process_mouse_move(x as f32, y as f32);
                self.buffer.push(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key or repeat ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if self.drain_core_events() {
                    event_loop.exit();
                    return;
                }

                if let Err(e) = self.present() {
                    error!(target: "platform", "Presenting frame failed: {}", e);
                    self.shutdown(event_loop);
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
