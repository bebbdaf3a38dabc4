//=========================================================================
// Button List
//=========================================================================
//
// Vertical menu of buttons, each carrying an action value.
//
// Keyboard selection wraps in both directions. Confirm triggers the
// selected entry; a pointer click triggers the clicked one.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Button;
use crate::core::input::{Action, KeyBindings, StateTracker};
use crate::core::render::{Color, Surface};

//=== Constants ===========================================================

const SELECTED_BORDER: Color = Color::rgba(255, 255, 100, 255);
const IDLE_BORDER: Color = Color::rgba(200, 200, 200, 255);

//=== ButtonList ==========================================================

#[derive(Debug, Clone)]
pub struct ButtonList<A> {
    entries: Vec<(Button, A)>,
    selected: usize,
    selected_border_width: f32,
    idle_border_width: f32,
}

impl<A: Copy> ButtonList<A> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            selected: 0,
            selected_border_width: 3.0,
            idle_border_width: 2.0,
        }
    }

    /// Appends a button (builder style).
    pub fn with(mut self, button: Button, action: A) -> Self {
        self.entries.push((button, action));
        self
    }

    /// Border widths for the selected and the other buttons.
    pub fn with_border_widths(mut self, selected: f32, idle: f32) -> Self {
        self.selected_border_width = selected;
        self.idle_border_width = idle;
        self
    }

    //--- Selection --------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_action(&self) -> Option<A> {
        self.entries.get(self.selected).map(|(_, action)| *action)
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.entries.iter().map(|(button, _)| button)
    }

    pub fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.entries.is_empty() {
            let len = self.entries.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Processes one tick of pointer and keyboard input.
    ///
    /// Returns the triggered action, if any. A click takes precedence
    /// over a keyboard confirm in the same tick.
    pub fn update(&mut self, input: &StateTracker, bindings: &KeyBindings) -> Option<A> {
        let mut clicked = None;
        for (button, action) in &mut self.entries {
            if button.update(input) && clicked.is_none() {
                clicked = Some(*action);
            }
        }

        if bindings.is_pressed(Action::NavigateDown, input) {
            self.select_next();
        }
        if bindings.is_pressed(Action::NavigateUp, input) {
            self.select_previous();
        }

        if clicked.is_some() {
            return clicked;
        }
        if bindings.is_pressed(Action::Confirm, input) {
            return self.selected_action();
        }
        None
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for (index, (button, _)) in self.entries.iter().enumerate() {
            let border = if index == self.selected {
                (SELECTED_BORDER, self.selected_border_width)
            } else {
                (IDLE_BORDER, self.idle_border_width)
            };
            button.draw(surface, Some(border));
        }
    }
}

impl<A: Copy> Default for ButtonList<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
