//=========================================================================
// Progress Bar
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::render::{Color, Rect, Surface};

//=== Constants ===========================================================

const BACKGROUND: Color = Color::rgba(40, 40, 40, 255);
const FILL: Color = Color::rgba(65, 135, 230, 255);
const BORDER: Color = Color::rgba(200, 200, 200, 255);
const BORDER_WIDTH: f32 = 2.0;

//=== ProgressBar =========================================================

/// Horizontal bar whose fill eases toward the target by a fixed step
/// per tick.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    rect: Rect,
    target: f32,
    displayed: f32,
    step: f32,
}

impl ProgressBar {
    pub const DEFAULT_STEP: f32 = 0.05;

    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            target: 0.0,
            displayed: 0.0,
            step: Self::DEFAULT_STEP,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Sets the target fraction, clamped to [0, 1].
    pub fn set_progress(&mut self, progress: f32) {
        self.target = progress.clamp(0.0, 1.0);
    }

    pub fn progress(&self) -> f32 {
        self.target
    }

    pub fn displayed(&self) -> f32 {
        self.displayed
    }

    /// Moves the displayed value one step toward the target.
    pub fn update(&mut self) {
        if self.displayed < self.target {
            self.displayed = (self.displayed + self.step).min(self.target);
        } else if self.displayed > self.target {
            self.displayed = (self.displayed - self.step).max(self.target);
        }
    }

    pub fn reset(&mut self) {
        self.target = 0.0;
        self.displayed = 0.0;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let fill = Rect {
            width: self.rect.width * self.displayed,
            ..self.rect
        };

        surface.fill_rect(self.rect, BACKGROUND);
        surface.fill_rect(fill, FILL);
        surface.stroke_rect(self.rect, BORDER_WIDTH, BORDER);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{DrawCommand, DrawList};

    fn bar() -> ProgressBar {
        ProgressBar::new(Rect::new(0.0, 0.0, 400.0, 30.0))
    }

    #[test]
    fn displayed_value_steps_toward_target() {
        let mut bar = bar();
        bar.set_progress(0.12);

        bar.update();
        assert!((bar.displayed() - 0.05).abs() < 1e-6);
        bar.update();
        bar.update();
        assert_eq!(bar.displayed(), 0.12);
    }

    #[test]
    fn displayed_value_steps_down_when_target_drops() {
        let mut bar = bar();
        bar.set_progress(1.0);
        for _ in 0..30 {
            bar.update();
        }
        bar.set_progress(0.98);
        bar.update();
        assert_eq!(bar.displayed(), 0.98);
    }

    #[test]
    fn progress_is_clamped() {
        let mut bar = bar();
        bar.set_progress(3.0);
        assert_eq!(bar.progress(), 1.0);
        bar.set_progress(-1.0);
        assert_eq!(bar.progress(), 0.0);
    }

    #[test]
    fn fill_width_tracks_displayed_value() {
        let mut bar = bar();
        bar.set_progress(0.5);
        for _ in 0..10 {
            bar.update();
        }

        let mut surface = DrawList::new(400, 30);
        bar.draw(&mut surface);

        match &surface.commands()[1] {
            DrawCommand::FillRect { rect, .. } => assert!((rect.width - 200.0).abs() < 1e-3),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
