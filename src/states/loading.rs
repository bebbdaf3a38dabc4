//=========================================================================
// Loading State
//=========================================================================
//
// Shows load progress while the asset workers decode images, then hands
// over to the next state.
//
// Flow:
//   initialize → request logo / background / sheet → start_loading
//   update     → poll progress → animate bar → pan background
//              → batch done? wait complete_delay → Replace(next), once
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::{Affine2, Vec2};
use log::debug;

//=== Internal Dependencies ===============================================

use super::{LOGO, PLAYER_SHEET, WORLD_BACKGROUND};
use crate::core::error::{InitError, UpdateError};
use crate::core::globals::GameContext;
use crate::core::render::{Color, Image, Rect, Surface};
use crate::core::state::{GameState, Transition, Underlay};
use crate::core::ui::ProgressBar;

//=== Constants ===========================================================

const BAR_WIDTH: f32 = 400.0;
const BAR_HEIGHT: f32 = 30.0;
const LOGO_LIFT: f32 = 100.0;
const OVERLAY: Color = Color::rgba(0, 0, 0, 180);
const FALLBACK_FILL: Color = Color::rgba(20, 20, 20, 255);

//=== LoadingState ========================================================

pub struct LoadingState {
    next: Option<Box<dyn GameState>>,
    bar: ProgressBar,
    batch_done: Arc<AtomicBool>,
    settle_timer: f64,
    pan: f64,
    background: Option<Image>,
    logo: Option<Image>,
}

impl LoadingState {
    /// `next` replaces this state once loading has finished.
    pub fn new(next: impl GameState + 'static) -> Self {
        Self {
            next: Some(Box::new(next)),
            bar: ProgressBar::new(Rect::new(0.0, 0.0, BAR_WIDTH, BAR_HEIGHT)),
            batch_done: Arc::new(AtomicBool::new(false)),
            settle_timer: 0.0,
            pan: 0.0,
            background: None,
            logo: None,
        }
    }

    /// Fraction last reported by the asset manager.
    pub fn progress(&self) -> f32 {
        self.bar.progress()
    }

    /// Horizontal background offset in pixels.
    pub fn pan(&self) -> f64 {
        self.pan
    }

    /// `true` once the handover to the next state has been requested.
    pub fn is_handed_over(&self) -> bool {
        self.next.is_none()
    }

    fn draw_background(&self, surface: &mut dyn Surface, background: &Image) {
        let (width, height) = surface.size();
        let (image_w, image_h) = background.dimensions();
        if image_w == 0 || image_h == 0 {
            return;
        }

        let fit = height as f32 / image_h as f32;
        let scale = if fit > 1.0 { fit } else { 1.0 };
        let span = image_w as f32 * scale;
        let offset = (self.pan as f32).rem_euclid(span);

        // Two copies side by side cover the wrap seam
        for copy in 0..2 {
            let x = copy as f32 * span - offset;
            let transform = Affine2::from_scale_angle_translation(Vec2::splat(scale), 0.0, Vec2::new(x, 0.0));
            surface.draw_image(background, None, transform);
        }

        surface.fill_rect(Rect::new(0.0, 0.0, width as f32, height as f32), OVERLAY);
    }
}

impl GameState for LoadingState {
    fn initialize(&mut self, ctx: &mut GameContext) -> Result<(), InitError> {
        let window = &ctx.config.window;
        let (width, height) = (window.width as f32, window.height as f32);
        self.bar = ProgressBar::new(Rect::centered_x(width, (height - BAR_HEIGHT) / 2.0, BAR_WIDTH, BAR_HEIGHT));

        let paths = &ctx.config.assets;
        ctx.assets.request_load(LOGO, paths.logo.clone())?;
        ctx.assets.request_load(WORLD_BACKGROUND, paths.world_background.clone())?;
        ctx.assets.request_load(PLAYER_SHEET, paths.player_sheet.clone())?;

        let batch_done = Arc::clone(&self.batch_done);
        ctx.assets.start_loading(Box::new(move || batch_done.store(true, Ordering::Release)))?;
        Ok(())
    }

    fn enter(&mut self, _ctx: &mut GameContext) {
        self.bar.reset();
        self.settle_timer = 0.0;
        self.pan = 0.0;
    }

    fn update(&mut self, ctx: &mut GameContext) -> Result<(), UpdateError> {
        self.bar.set_progress(ctx.assets.progress()?);
        self.bar.update();
        self.pan += ctx.config.loading.pan_speed;

        if self.background.is_none() {
            self.background = ctx.assets.get(WORLD_BACKGROUND)?;
        }
        if self.logo.is_none() {
            self.logo = ctx.assets.get(LOGO)?;
        }

        if self.batch_done.load(Ordering::Acquire) {
            self.settle_timer += ctx.delta;
            if self.settle_timer >= ctx.config.loading.complete_delay {
                if let Some(next) = self.next.take() {
                    debug!(target: "state", "Loading finished, handing over to {}", next.id());
                    ctx.transitions.request(Transition::Replace(next));
                }
            }
        }

        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, _below: Underlay<'_>) {
        let (width, height) = surface.size();
        surface.clear(Color::BLACK);

        match &self.background {
            Some(background) => self.draw_background(surface, background),
            None => surface.fill_rect(Rect::new(0.0, 0.0, width as f32, height as f32), FALLBACK_FILL),
        }

        if let Some(logo) = &self.logo {
            let (logo_w, logo_h) = logo.dimensions();
            let x = (width as f32 - logo_w as f32) / 2.0;
            let y = (height as f32 - logo_h as f32) / 2.0 - LOGO_LIFT;
            surface.draw_image(logo, None, Affine2::from_translation(Vec2::new(x, y)));
        }

        self.bar.draw(surface);
    }

    fn id(&self) -> &'static str {
        "Loading"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::render::{DrawCommand, DrawList};
    use crate::core::state::TransitionKind;
    use image::{Rgba, RgbaImage};
    use std::time::{Duration, Instant};

    struct Next;

    impl GameState for Next {
        fn update(&mut self, _ctx: &mut GameContext) -> Result<(), UpdateError> {
            Ok(())
        }

        fn draw(&self, _surface: &mut dyn Surface, _below: Underlay<'_>) {}

        fn id(&self) -> &'static str {
            "Next"
        }
    }

    fn context_with_assets(dir: &std::path::Path) -> GameContext {
        let image = RgbaImage::from_pixel(8, 4, Rgba([10, 20, 30, 255]));
        for name in ["logo.png", "background.png", "sheet.png"] {
            image.save(dir.join(name)).unwrap();
        }

        let mut config = GameConfig::default();
        config.assets.logo = dir.join("logo.png");
        config.assets.world_background = dir.join("background.png");
        config.assets.player_sheet = dir.join("sheet.png");
        config.loading.complete_delay = 0.05;
        GameContext::new(Arc::new(config))
    }

    fn started(ctx: &mut GameContext) -> LoadingState {
        let mut state = LoadingState::new(Next);
        state.initialize(ctx).unwrap();
        state.enter(ctx);
        state
    }

    /// Ticks until every worker has reported in.
    fn wait_for_batch(state: &mut LoadingState, ctx: &mut GameContext) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !state.batch_done.load(Ordering::Acquire) {
            assert!(Instant::now() < deadline, "asset batch never finished");
            std::thread::sleep(Duration::from_millis(5));
        }
        state.update(ctx).unwrap();
    }

    //=====================================================================
    // Progress and Handover
    //=====================================================================

    #[test]
    fn hands_over_once_after_delay() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_with_assets(dir.path());
        ctx.delta = 0.02;
        let mut state = started(&mut ctx);

        wait_for_batch(&mut state, &mut ctx);
        assert_eq!(state.progress(), 1.0);
        assert!(ctx.transitions.is_empty(), "must linger on the full bar");

        for _ in 0..10 {
            state.update(&mut ctx).unwrap();
        }

        assert_eq!(ctx.transitions.kinds(), vec![TransitionKind::Replace]);
        let transition = ctx.transitions.take_next().unwrap();
        assert_eq!(transition.target_id(), Some("Next"));
        assert!(state.is_handed_over());
    }

    #[test]
    fn failed_loads_still_finish_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GameConfig::default();
        config.assets.logo = dir.path().join("missing.png");
        config.assets.world_background = dir.path().join("missing.png");
        config.assets.player_sheet = dir.path().join("missing.png");
        let mut ctx = GameContext::new(Arc::new(config));
        let mut state = started(&mut ctx);

        wait_for_batch(&mut state, &mut ctx);

        assert_eq!(state.progress(), 1.0);
        assert!(state.background.is_none());
        assert!(state.logo.is_none());
    }

    #[test]
    fn background_pans_every_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_with_assets(dir.path());
        let mut state = started(&mut ctx);

        state.update(&mut ctx).unwrap();
        state.update(&mut ctx).unwrap();

        assert_eq!(state.pan(), 2.0 * ctx.config.loading.pan_speed);
    }

    //=====================================================================
    // Drawing
    //=====================================================================

    #[test]
    fn draws_fallback_and_bar_without_assets() {
        let state = LoadingState::new(Next);
        let mut frame = DrawList::new(1280, 720);

        state.draw(&mut frame, Underlay::empty());

        let commands = frame.commands();
        assert_eq!(commands[0], DrawCommand::Clear(Color::BLACK));
        assert!(matches!(
            commands[1],
            DrawCommand::FillRect { color: FALLBACK_FILL, .. }
        ));
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Image { .. })));
    }

    #[test]
    fn wrapped_background_is_drawn_twice_under_overlay() {
        let mut state = LoadingState::new(Next);
        state.background = Some(Arc::new(RgbaImage::new(100, 720)));
        state.pan = 130.0;
        let mut frame = DrawList::new(1280, 720);

        state.draw(&mut frame, Underlay::empty());

        let offsets: Vec<f32> = frame
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { transform, .. } => Some(transform.translation.x),
                _ => None,
            })
            .collect();
        assert_eq!(offsets, vec![-30.0, 70.0]);
        assert!(frame
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillRect { color: OVERLAY, .. })));
    }
}
