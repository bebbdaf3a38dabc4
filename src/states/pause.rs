//=========================================================================
// Pause Menu State
//=========================================================================
//
// Overlay menu pushed on top of a running game.
//
// The paused state stays on the stack underneath and keeps drawing
// through the Underlay; this state adds a translucent overlay, a title
// box and its buttons.
//
//   Resume / Pause key → Pop
//   Main Menu          → Replace(MainMenu), the paused state stays below
//   Exit Game          → terminate the process
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{exit_process, MenuState};
use crate::core::error::{InitError, UpdateError};
use crate::core::globals::GameContext;
use crate::core::input::Action;
use crate::core::render::{Color, Rect, Surface};
use crate::core::state::{GameState, Underlay};
use crate::core::ui::{Button, ButtonList, ButtonStyle};

//=== Constants ===========================================================

const BUTTON_WIDTH: f32 = 200.0;
const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_SPACING: f32 = 70.0;

const TITLE_WIDTH: f32 = 300.0;
const TITLE_HEIGHT: f32 = 60.0;
const TITLE_FILL: Color = Color::rgba(180, 60, 60, 200);
const TITLE_BORDER: Color = Color::rgba(220, 220, 220, 255);

const OVERLAY: Color = Color::rgba(0, 0, 0, 180);

//=== PauseAction =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Resume,
    MainMenu,
    ExitGame,
}

//=== PauseState ==========================================================

pub struct PauseState {
    paused: &'static str,
    buttons: ButtonList<PauseAction>,
}

impl PauseState {
    /// `paused` identifies the state this menu was opened over.
    pub fn new(paused: &'static str) -> Self {
        Self {
            paused,
            buttons: ButtonList::new(),
        }
    }

    pub fn paused(&self) -> &'static str {
        self.paused
    }

    pub fn selected(&self) -> usize {
        self.buttons.selected()
    }

    fn layout(width: f32, height: f32) -> ButtonList<PauseAction> {
        let entries = [
            (PauseAction::Resume, Color::rgba(0, 120, 0, 255), Color::rgba(0, 180, 0, 255)),
            (PauseAction::MainMenu, Color::rgba(60, 60, 180, 255), Color::rgba(80, 80, 255, 255)),
            (PauseAction::ExitGame, Color::rgba(180, 0, 0, 255), Color::rgba(255, 0, 0, 255)),
        ];
        let top = height / 2.0 - 50.0;

        entries
            .into_iter()
            .enumerate()
            .fold(ButtonList::new().with_border_widths(4.0, 3.0), |list, (index, (action, fill, hover))| {
                let rect = Rect::centered_x(width, top + index as f32 * BUTTON_SPACING, BUTTON_WIDTH, BUTTON_HEIGHT);
                list.with(Button::new(rect, ButtonStyle::tinted(fill, hover)), action)
            })
    }
}

impl GameState for PauseState {
    fn initialize(&mut self, ctx: &mut GameContext) -> Result<(), InitError> {
        let window = &ctx.config.window;
        self.buttons = Self::layout(window.width as f32, window.height as f32);
        Ok(())
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Result<(), UpdateError> {
        if ctx.is_pressed(Action::Pause) {
            ctx.transitions.request_pop();
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut GameContext) -> Result<(), UpdateError> {
        match self.buttons.update(&ctx.input, &ctx.bindings) {
            Some(PauseAction::Resume) => ctx.transitions.request_pop(),
            Some(PauseAction::MainMenu) => ctx.transitions.request_replace(MenuState::new()),
            Some(PauseAction::ExitGame) => exit_process(0),
            None => {}
        }
        Ok(())
    }

    fn draw(&self, surface: &mut dyn Surface, below: Underlay<'_>) {
        below.draw(surface);

        let (width, height) = (surface.size().0 as f32, surface.size().1 as f32);
        surface.fill_rect(Rect::new(0.0, 0.0, width, height), OVERLAY);

        let title = Rect::centered_x(width, height / 2.0 - 150.0, TITLE_WIDTH, TITLE_HEIGHT);
        surface.fill_rect(title, TITLE_FILL);
        surface.stroke_rect(title, 3.0, TITLE_BORDER);

        self.buttons.draw(surface);
    }

    fn id(&self) -> &'static str {
        "PauseMenu"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::render::{DrawCommand, DrawList};
    use crate::core::state::TransitionKind;
    use std::sync::Arc;

    struct Backdrop;

    impl GameState for Backdrop {
        fn update(&mut self, _ctx: &mut GameContext) -> Result<(), UpdateError> {
            Ok(())
        }

        fn draw(&self, surface: &mut dyn Surface, _below: Underlay<'_>) {
            surface.clear(Color::WHITE);
        }

        fn id(&self) -> &'static str {
            "Backdrop"
        }
    }

    fn started() -> (PauseState, GameContext) {
        let mut ctx = GameContext::new(Arc::new(GameConfig::default()));
        let mut pause = PauseState::new("Gameplay");
        pause.initialize(&mut ctx).unwrap();
        pause.enter(&mut ctx);
        (pause, ctx)
    }

    fn tick(pause: &mut PauseState, ctx: &mut GameContext, key: KeyCode) {
        ctx.input.begin_frame();
        ctx.input.process_events(&[InputEvent::KeyDown(key), InputEvent::KeyUp(key)]);
        pause.handle_input(ctx).unwrap();
        pause.update(ctx).unwrap();
    }

    //=====================================================================
    // Actions
    //=====================================================================

    #[test]
    fn resume_pops() {
        let (mut pause, mut ctx) = started();
        tick(&mut pause, &mut ctx, KeyCode::Enter);
        assert_eq!(ctx.transitions.kinds(), vec![TransitionKind::Pop]);
    }

    #[test]
    fn pause_key_pops() {
        let (mut pause, mut ctx) = started();
        tick(&mut pause, &mut ctx, KeyCode::Escape);
        assert_eq!(ctx.transitions.kinds(), vec![TransitionKind::Pop]);
    }

    #[test]
    fn main_menu_replaces_only_the_pause() {
        let (mut pause, mut ctx) = started();

        tick(&mut pause, &mut ctx, KeyCode::ArrowDown);
        assert_eq!(pause.selected(), 1);
        tick(&mut pause, &mut ctx, KeyCode::Enter);

        assert_eq!(ctx.transitions.kinds(), vec![TransitionKind::Replace]);
        assert_eq!(ctx.transitions.take_next().unwrap().target_id(), Some("MainMenu"));
    }

    //=====================================================================
    // Drawing
    //=====================================================================

    #[test]
    fn draws_paused_state_then_overlay() {
        let (pause, _ctx) = started();
        let backdrop: Vec<Box<dyn GameState>> = vec![Box::new(Backdrop)];
        let mut frame = DrawList::new(1280, 720);

        pause.draw(&mut frame, Underlay::new(&backdrop));

        let commands = frame.commands();
        assert_eq!(commands[0], DrawCommand::Clear(Color::WHITE));
        assert_eq!(
            commands[1],
            DrawCommand::FillRect { rect: Rect::new(0.0, 0.0, 1280.0, 720.0), color: OVERLAY }
        );
        assert_eq!(
            commands[2],
            DrawCommand::FillRect { rect: Rect::new(490.0, 210.0, 300.0, 60.0), color: TITLE_FILL }
        );
    }

    #[test]
    fn selected_button_gets_wider_border() {
        let (pause, _ctx) = started();
        let mut frame = DrawList::new(1280, 720);

        pause.draw(&mut frame, Underlay::empty());

        let widths: Vec<f32> = frame
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeRect { width, .. } => Some(*width),
                _ => None,
            })
            .collect();
        // Title, then Resume (selected), Main Menu, Exit Game
        assert_eq!(widths, vec![3.0, 4.0, 3.0, 3.0]);
    }
}
