//=========================================================================
// Gameplay State
//=========================================================================
//
// One player walking a walled tile world with a centred camera.
//
// Per tick:
//   handle_input → pause pressed? flag + Push(Pause), skip this tick
//   update       → MoveIntent → resolve_movement → AnimationClock
//
// Camera = player position - half the screen.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;

use glam::{Affine2, DVec2, Vec2};
use log::debug;

//=== Internal Dependencies ===============================================

use super::{PauseState, PLAYER_SHEET, WORLD_BACKGROUND};
use crate::config::AnimationConfig;
use crate::core::error::{InitError, UpdateError};
use crate::core::globals::GameContext;
use crate::core::input::Action;
use crate::core::render::{Color, Image, Rect, SourceRect, Surface};
use crate::core::state::{GameState, Underlay};
use crate::core::world::{resolve_movement, AnimationClock, AnimationState, MoveIntent, TileGrid};

//=== Constants ===========================================================

const CLEAR: Color = Color::rgba(30, 30, 30, 255);
const FLOOR_FALLBACK: Color = Color::rgba(50, 50, 50, 255);
const WALL: Color = Color::rgba(70, 70, 70, 255);
const PLAYER_FALLBACK: Color = Color::rgba(255, 0, 0, 255);

//=== GameplayState =======================================================

pub struct GameplayState {
    grid: Option<TileGrid>,
    position: DVec2,
    size: DVec2,
    speed: f64,
    clock: AnimationClock,
    animation: AnimationState,
    sheet: AnimationConfig,
    is_paused: bool,
    player_sheet: Option<Image>,
    background: Option<Image>,
}

impl GameplayState {
    /// World and player are set up from the config in `initialize`.
    pub fn new() -> Self {
        let sheet = AnimationConfig::default();
        Self {
            grid: None,
            position: DVec2::ZERO,
            size: DVec2::ZERO,
            speed: 0.0,
            clock: AnimationClock::new(sheet.frame_duration, sheet.frame_count),
            animation: AnimationState::default(),
            sheet,
            is_paused: false,
            player_sheet: None,
            background: None,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn animation(&self) -> AnimationState {
        self.animation
    }

    pub fn grid(&self) -> Option<&TileGrid> {
        self.grid.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Top-left of the view in world space for a `width` × `height` screen.
    pub fn camera(&self, width: u32, height: u32) -> DVec2 {
        self.position - DVec2::new(f64::from(width), f64::from(height)) / 2.0
    }

    //--- Internal Helpers -------------------------------------------------

    fn load_grid(ctx: &GameContext) -> Result<TileGrid, InitError> {
        let world = &ctx.config.world;
        match &world.map {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| InitError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(TileGrid::parse(&text, world.tile_size)?)
            }
            None => Ok(TileGrid::bordered(world.tiles_x, world.tiles_y, world.tile_size)?),
        }
    }

    fn draw_walls(&self, surface: &mut dyn Surface, camera: DVec2) {
        let Some(grid) = &self.grid else {
            return;
        };

        let (width, height) = surface.size();
        let tile = grid.tile_size();
        let first_col = (camera.x / tile).floor() as i64;
        let first_row = (camera.y / tile).floor() as i64;
        let last_col = ((camera.x + f64::from(width)) / tile).ceil() as i64;
        let last_row = ((camera.y + f64::from(height)) / tile).ceil() as i64;

        for row in first_row.max(0)..=last_row {
            for col in first_col.max(0)..=last_col {
                if grid.tile(row, col).is_some_and(|t| t.is_wall) {
                    let x = col as f64 * tile - camera.x;
                    let y = row as f64 * tile - camera.y;
                    surface.fill_rect(Rect::new(x as f32, y as f32, tile as f32, tile as f32), WALL);
                }
            }
        }
    }

    fn draw_player(&self, surface: &mut dyn Surface, camera: DVec2) {
        let screen = (self.position - camera).as_vec2();

        match &self.player_sheet {
            Some(sheet) => {
                let frame = self.animation.frame_index as u32;
                let source = SourceRect::new(
                    self.sheet.sheet_start_x + frame * self.sheet.frame_step_x,
                    self.sheet.sheet_start_y,
                    self.sheet.frame_width,
                    self.sheet.frame_height,
                );
                let transform = Affine2::from_scale_angle_translation(Vec2::splat(self.sheet.scale), 0.0, screen);
                surface.draw_image(sheet, Some(source), transform);
            }
            None => {
                let side = self.grid.as_ref().map_or(self.size.x, TileGrid::tile_size) as f32;
                surface.fill_rect(Rect::new(screen.x, screen.y, side, side), PLAYER_FALLBACK);
            }
        }
    }
}

impl Default for GameplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for GameplayState {
    fn initialize(&mut self, ctx: &mut GameContext) -> Result<(), InitError> {
        let grid = Self::load_grid(ctx)?;
        debug!(target: "state", "World {}x{} tiles", grid.columns(), grid.rows());
        self.grid = Some(grid);

        let player = &ctx.config.player;
        self.position = DVec2::new(player.start_x, player.start_y);
        self.size = DVec2::new(player.width, player.height);
        self.speed = player.speed;

        self.sheet = ctx.config.animation.clone();
        self.clock = AnimationClock::new(self.sheet.frame_duration, self.sheet.frame_count);
        self.animation = AnimationState::default();

        self.player_sheet = ctx.assets.get(PLAYER_SHEET)?;
        self.background = ctx.assets.get(WORLD_BACKGROUND)?;
        Ok(())
    }

    fn enter(&mut self, _ctx: &mut GameContext) {
        self.is_paused = false;
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Result<(), UpdateError> {
        if !self.is_paused && ctx.is_pressed(Action::Pause) {
            self.is_paused = true;
            ctx.transitions.request_push(PauseState::new(self.id()));
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut GameContext) -> Result<(), UpdateError> {
        if self.is_paused {
            return Ok(());
        }

        let intent = MoveIntent {
            up: ctx.is_down(Action::MoveUp),
            down: ctx.is_down(Action::MoveDown),
            left: ctx.is_down(Action::MoveLeft),
            right: ctx.is_down(Action::MoveRight),
        };

        self.position = resolve_movement(&self.grid, self.position, self.size, intent.delta(self.speed));
        self.clock.advance(&mut self.animation, intent.is_moving(), ctx.delta);
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, _below: Underlay<'_>) {
        let (width, height) = surface.size();
        let camera = self.camera(width, height);

        surface.clear(CLEAR);
        match &self.background {
            Some(background) => {
                surface.draw_image(background, None, Affine2::from_translation(-camera.as_vec2()));
            }
            None => surface.fill_rect(Rect::new(0.0, 0.0, width as f32, height as f32), FLOOR_FALLBACK),
        }

        self.draw_walls(surface, camera);
        self.draw_player(surface, camera);
    }

    fn id(&self) -> &'static str {
        "Gameplay"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
