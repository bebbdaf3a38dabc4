//=========================================================================
// Render Primitives
//=========================================================================
//
// Backend-agnostic drawing vocabulary.
//
// Architecture:
//   GameState::draw() → &mut dyn Surface
//                          ├─ DrawList (core thread, recorded per tick)
//                          └─ Framebuffer (platform thread, replays list)
//
// Only relative placement and size are meaningful; pixel output is up
// to the backend.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use glam::Affine2;
use image::RgbaImage;

//=== Module Declarations =================================================

mod draw_list;

//=== Public API ==========================================================

pub use draw_list::{DrawCommand, DrawList};

/// Decoded image shared between the asset registry, states and frames.
pub type Image = Arc<RgbaImage>;

//=== Color ===============================================================

/// Straight (non-premultiplied) 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of `width` × `height` centred horizontally in a surface
    /// `surface_width` wide, with its top edge at `y`.
    pub fn centered_x(surface_width: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new((surface_width - width) / 2.0, y, width, height)
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

//=== SourceRect ==========================================================

/// Integer sub-region of an image (sprite sheet frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

//=== Surface =============================================================

/// Opaque render target the states draw into.
pub trait Surface {
    /// Logical size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outlines `rect` with a stroke of `width`, centred on the edges.
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color);

    /// Blits `image` (or its `source` region) through `transform`, which
    /// maps source pixel coordinates to surface coordinates.
    fn draw_image(&mut self, image: &Image, source: Option<SourceRect>, transform: Affine2);
}
