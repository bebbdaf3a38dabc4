//=========================================================================
// Main Menu State
//=========================================================================
//
// Title screen over a slowly circling view of the world background.
//
// Buttons (keyboard or pointer):
//   Play    → Replace(Gameplay)
//   Options → nothing yet
//   Exit    → terminate the process
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f64::consts::TAU;
use std::time::Instant;

use glam::{Affine2, DVec2};
use log::debug;

//=== Internal Dependencies ===============================================

use super::{exit_process, GameplayState, WORLD_BACKGROUND};
use crate::core::error::{InitError, UpdateError};
use crate::core::globals::GameContext;
use crate::core::render::{Color, Image, Rect, Surface};
use crate::core::state::{GameState, Underlay};
use crate::core::ui::{Button, ButtonList, ButtonStyle};

//=== Constants ===========================================================

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_TOP: f32 = 400.0;
const BUTTON_SPACING: f32 = 70.0;

const TITLE_WIDTH: f32 = 400.0;
const TITLE_HEIGHT: f32 = 80.0;
const TITLE_TOP: f32 = 100.0;
const TITLE_FILL: Color = Color::rgba(180, 180, 60, 255);

const FALLBACK_FILL: Color = Color::rgba(20, 30, 50, 255);

const CAMERA_CENTRE: DVec2 = DVec2::new(-1000.0, -1000.0);
const CAMERA_RADIUS: f64 = 20.0;

/// Background offset `secs` seconds after the menu was built.
pub fn camera_offset(secs: f64) -> DVec2 {
    let theta = secs.rem_euclid(TAU);
    CAMERA_CENTRE + CAMERA_RADIUS * DVec2::new(theta.cos(), theta.sin())
}

//=== MenuAction ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Options,
    Exit,
}

//=== MenuState ===========================================================

pub struct MenuState {
    buttons: ButtonList<MenuAction>,
    created: Instant,
    camera: DVec2,
    background: Option<Image>,
}

impl MenuState {
    pub fn new() -> Self {
        Self {
            buttons: ButtonList::new(),
            created: Instant::now(),
            camera: camera_offset(0.0),
            background: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.buttons.selected()
    }

    pub fn camera(&self) -> DVec2 {
        self.camera
    }

    fn layout(screen_width: f32) -> ButtonList<MenuAction> {
        let entries = [
            (MenuAction::Play, Color::rgba(0, 120, 0, 255), Color::rgba(0, 180, 0, 255)),
            (MenuAction::Options, Color::rgba(0, 0, 120, 255), Color::rgba(0, 0, 180, 255)),
            (MenuAction::Exit, Color::rgba(120, 0, 0, 255), Color::rgba(180, 0, 0, 255)),
        ];

        entries
            .into_iter()
            .enumerate()
            .fold(ButtonList::new(), |list, (index, (action, fill, hover))| {
                let y = BUTTON_TOP + index as f32 * BUTTON_SPACING;
                let rect = Rect::centered_x(screen_width, y, BUTTON_WIDTH, BUTTON_HEIGHT);
                list.with(Button::new(rect, ButtonStyle::tinted(fill, hover)), action)
            })
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for MenuState {
    fn initialize(&mut self, ctx: &mut GameContext) -> Result<(), InitError> {
        self.buttons = Self::layout(ctx.config.window.width as f32);
        self.background = ctx.assets.get(WORLD_BACKGROUND)?;
        Ok(())
    }

    fn update(&mut self, ctx: &mut GameContext) -> Result<(), UpdateError> {
        self.camera = camera_offset(self.created.elapsed().as_secs_f64());

        match self.buttons.update(&ctx.input, &ctx.bindings) {
            Some(MenuAction::Play) => ctx.transitions.request_replace(GameplayState::new()),
            Some(MenuAction::Options) => debug!(target: "state", "Options selected (no options yet)"),
            Some(MenuAction::Exit) => exit_process(0),
            None => {}
        }

        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, _below: Underlay<'_>) {
        let (width, _) = surface.size();

        match &self.background {
            Some(background) => {
                surface.clear(Color::BLACK);
                let offset = self.camera.as_vec2();
                surface.draw_image(background, None, Affine2::from_translation(offset));
            }
            None => surface.clear(FALLBACK_FILL),
        }

        let title = Rect::centered_x(width as f32, TITLE_TOP, TITLE_WIDTH, TITLE_HEIGHT);
        surface.fill_rect(title, TITLE_FILL);
        surface.stroke_rect(title, 3.0, ButtonStyle::BORDER);

        self.buttons.draw(surface);
    }

    fn id(&self) -> &'static str {
        "MainMenu"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
