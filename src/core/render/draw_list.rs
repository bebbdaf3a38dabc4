//=========================================================================
// Draw List
//=========================================================================
//
// Recording surface used on the core thread.
//
// Each tick the active state draws into a fresh DrawList, which is sent
// to the platform thread and replayed onto the real framebuffer. Tests
// inspect the recorded commands directly.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Affine2;

//=== Internal Dependencies ===============================================

use super::{Color, Image, Rect, SourceRect, Surface};

//=== DrawCommand =========================================================

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, width: f32, color: Color },
    Image {
        image: Image,
        source: Option<SourceRect>,
        transform: Affine2,
    },
}

//=== DrawList ============================================================

/// Ordered list of draw commands for one frame.
#[derive(Debug, Clone)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(64),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replays every command, in order, onto `target`.
    pub fn replay(&self, target: &mut dyn Surface) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => target.clear(*color),
                DrawCommand::FillRect { rect, color } => target.fill_rect(*rect, *color),
                DrawCommand::StrokeRect { rect, width, color } => {
                    target.stroke_rect(*rect, *width, *color)
                }
                DrawCommand::Image { image, source, transform } => {
                    target.draw_image(image, *source, *transform)
                }
            }
        }
    }
}

impl Surface for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        // Everything recorded so far would be painted over anyway
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { rect, width, color });
    }

    fn draw_image(&mut self, image: &Image, source: Option<SourceRect>, transform: Affine2) {
        self.commands.push(DrawCommand::Image {
            image: image.clone(),
            source,
            transform,
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_in_order() {
        let mut list = DrawList::new(640, 480);
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);

        list.fill_rect(rect, Color::WHITE);
        list.stroke_rect(rect, 2.0, Color::BLACK);

        assert_eq!(list.size(), (640, 480));
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::FillRect { rect, color: Color::WHITE },
                DrawCommand::StrokeRect { rect, width: 2.0, color: Color::BLACK },
            ]
        );
    }

    #[test]
    fn clear_discards_earlier_commands() {
        let mut list = DrawList::new(10, 10);
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.clear(Color::BLACK);

        assert_eq!(list.commands(), &[DrawCommand::Clear(Color::BLACK)]);
    }

    #[test]
    fn replay_reproduces_commands() {
        let mut source = DrawList::new(10, 10);
        source.clear(Color::BLACK);
        source.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::WHITE);

        let mut target = DrawList::new(10, 10);
        source.replay(&mut target);

        assert_eq!(source.commands(), target.commands());
    }
}
