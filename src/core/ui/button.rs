//=========================================================================
// Button
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{MouseButton, StateTracker};
use crate::core::render::{Color, Rect, Surface};

//=== ButtonStyle =========================================================

/// Colours and border of a button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub fill: Color,
    pub hover: Color,
    pub pressed: Color,
    pub disabled: Color,
    pub border: Color,
    pub border_width: f32,
}

impl ButtonStyle {
    pub const BORDER: Color = Color::rgba(200, 200, 200, 255);

    /// Default style with custom fill and hover colours.
    pub fn tinted(fill: Color, hover: Color) -> Self {
        Self {
            fill,
            hover,
            border_width: 3.0,
            ..Self::default()
        }
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            fill: Color::rgba(60, 60, 60, 255),
            hover: Color::rgba(80, 80, 80, 255),
            pressed: Color::rgba(40, 40, 40, 255),
            disabled: Color::rgba(100, 100, 100, 128),
            border: Self::BORDER,
            border_width: 2.0,
        }
    }
}

//=== ButtonVisual ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVisual {
    #[default]
    Normal,
    Hovered,
    Pressed,
    Disabled,
}

//=== Button ==============================================================

/// Clickable rectangle.
///
/// A click is a left press that starts and ends over the button.
#[derive(Debug, Clone)]
pub struct Button {
    rect: Rect,
    style: ButtonStyle,
    visual: ButtonVisual,
    enabled: bool,
}

impl Button {
    pub fn new(rect: Rect, style: ButtonStyle) -> Self {
        Self {
            rect,
            style,
            visual: ButtonVisual::Normal,
            enabled: true,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn visual(&self) -> ButtonVisual {
        self.visual
    }

    pub fn is_hovered(&self) -> bool {
        matches!(self.visual, ButtonVisual::Hovered | ButtonVisual::Pressed)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Samples the pointer; returns `true` on the tick a click completes.
    pub fn update(&mut self, input: &StateTracker) -> bool {
        if !self.enabled {
            self.visual = ButtonVisual::Disabled;
            return false;
        }

        let (x, y) = input.mouse_position();
        if !self.rect.contains(x, y) {
            self.visual = ButtonVisual::Normal;
            return false;
        }

        if input.is_button_down(MouseButton::Left) {
            // Only a press that began here arms the button
            if input.is_button_pressed(MouseButton::Left) || self.visual == ButtonVisual::Pressed {
                self.visual = ButtonVisual::Pressed;
            }
            return false;
        }

        // Press and release can land in the same tick
        let tapped = input.is_button_pressed(MouseButton::Left) && input.is_button_released(MouseButton::Left);
        let clicked = self.visual == ButtonVisual::Pressed || tapped;
        self.visual = ButtonVisual::Hovered;
        clicked
    }

    /// Draws the fill and border; `highlight` overrides the border.
    pub fn draw(&self, surface: &mut dyn Surface, highlight: Option<(Color, f32)>) {
        let fill = match self.visual {
            ButtonVisual::Normal => self.style.fill,
            ButtonVisual::Hovered => self.style.hover,
            ButtonVisual::Pressed => self.style.pressed,
            ButtonVisual::Disabled => self.style.disabled,
        };
        let (border, width) = highlight.unwrap_or((self.style.border, self.style.border_width));

        surface.fill_rect(self.rect, fill);
        surface.stroke_rect(self.rect, width, border);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputEvent;
    use crate::core::render::{DrawCommand, DrawList};

    fn button() -> Button {
        Button::new(Rect::new(10.0, 10.0, 100.0, 40.0), ButtonStyle::default())
    }

    fn step(input: &mut StateTracker, events: &[InputEvent]) {
        input.begin_frame();
        input.process_events(events);
    }

    #[test]
    fn hover_follows_pointer() {
        let mut input = StateTracker::new();
        let mut button = button();

        step(&mut input, &[InputEvent::MouseMoved { x: 50.0, y: 20.0 }]);
        button.update(&input);
        assert_eq!(button.visual(), ButtonVisual::Hovered);

        step(&mut input, &[InputEvent::MouseMoved { x: 500.0, y: 20.0 }]);
        button.update(&input);
        assert_eq!(button.visual(), ButtonVisual::Normal);
    }

    #[test]
    fn press_then_release_over_button_clicks() {
        let mut input = StateTracker::new();
        let mut button = button();

        step(
            &mut input,
            &[
                InputEvent::MouseMoved { x: 50.0, y: 20.0 },
                InputEvent::MouseButtonDown(MouseButton::Left),
            ],
        );
        assert!(!button.update(&input));
        assert_eq!(button.visual(), ButtonVisual::Pressed);

        step(&mut input, &[]);
        assert!(!button.update(&input));

        step(&mut input, &[InputEvent::MouseButtonUp(MouseButton::Left)]);
        assert!(button.update(&input));
        assert_eq!(button.visual(), ButtonVisual::Hovered);
    }

    #[test]
    fn press_and_release_in_one_tick_clicks() {
        let mut input = StateTracker::new();
        let mut button = button();

        step(
            &mut input,
            &[
                InputEvent::MouseMoved { x: 50.0, y: 20.0 },
                InputEvent::MouseButtonDown(MouseButton::Left),
                InputEvent::MouseButtonUp(MouseButton::Left),
            ],
        );
        assert!(button.update(&input));
        assert_eq!(button.visual(), ButtonVisual::Hovered);

        step(&mut input, &[]);
        assert!(!button.update(&input));
    }

    #[test]
    fn press_dragged_in_from_outside_does_not_click() {
        let mut input = StateTracker::new();
        let mut button = button();

        step(
            &mut input,
            &[
                InputEvent::MouseMoved { x: 500.0, y: 20.0 },
                InputEvent::MouseButtonDown(MouseButton::Left),
            ],
        );
        button.update(&input);

        step(&mut input, &[InputEvent::MouseMoved { x: 50.0, y: 20.0 }]);
        button.update(&input);
        assert_eq!(button.visual(), ButtonVisual::Normal);

        step(&mut input, &[InputEvent::MouseButtonUp(MouseButton::Left)]);
        assert!(!button.update(&input));
    }

    #[test]
    fn disabled_button_ignores_pointer() {
        let mut input = StateTracker::new();
        let mut button = button();
        button.set_enabled(false);

        step(&mut input, &[InputEvent::MouseMoved { x: 50.0, y: 20.0 }]);
        assert!(!button.update(&input));
        assert_eq!(button.visual(), ButtonVisual::Disabled);
    }

    #[test]
    fn draw_uses_highlight_border() {
        let button = button();
        let mut list = DrawList::new(200, 200);
        let gold = Color::rgba(255, 255, 100, 255);

        button.draw(&mut list, Some((gold, 4.0)));

        assert_eq!(
            list.commands()[1],
            DrawCommand::StrokeRect { rect: button.rect(), width: 4.0, color: gold }
        );
    }
}
