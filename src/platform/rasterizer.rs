//=========================================================================
// Rasterizer
//=========================================================================
//
// Software Surface over an RGBA8 pixel buffer (the pixels framebuffer).
//
// Architecture:
//   DrawList::replay() → Framebuffer (fill / stroke / blit) → &mut [u8]
//
// Every primitive is clipped to the buffer and composited source-over
// with straight alpha. Images are sampled nearest-neighbour through the
// inverse of their transform.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};

//=== Internal Dependencies ===============================================

use crate::core::render::{Color, Image, Rect, SourceRect, Surface};

//=== Framebuffer =========================================================

/// Borrowed `width` × `height` RGBA8 buffer, row-major, no padding.
pub(crate) struct Framebuffer<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Framebuffer<'a> {
    /// Returns `None` if `pixels` is not exactly `width * height * 4` long.
    pub(crate) fn new(pixels: &'a mut [u8], width: u32, height: u32) -> Option<Self> {
        let expected = width as usize * height as usize * 4;
        (pixels.len() == expected).then_some(Self { pixels, width, height })
    }

    //--- Pixel Access -----------------------------------------------------

    fn blend(&mut self, x: usize, y: usize, color: [u8; 4]) {
        let index = (y * self.width as usize + x) * 4;
        let Some(dst) = self.pixels.get_mut(index..index + 4) else {
            return;
        };

        match color[3] {
            0 => {}
            255 => dst.copy_from_slice(&color),
            alpha => {
                let a = u32::from(alpha);
                let inv = 255 - a;
                for channel in 0..3 {
                    let mixed = u32::from(color[channel]) * a + u32::from(dst[channel]) * inv;
                    dst[channel] = ((mixed + 127) / 255) as u8;
                }
                let out_alpha = a + (u32::from(dst[3]) * inv + 127) / 255;
                dst[3] = out_alpha.min(255) as u8;
            }
        }
    }

    /// Pixel span [start, end) covered by `start..start + length` along an
    /// axis of `limit` pixels. Pixels are covered when their centre is.
    fn span(start: f32, length: f32, limit: u32) -> (usize, usize) {
        let lo = start.round().clamp(0.0, limit as f32) as usize;
        let hi = (start + length).round().clamp(0.0, limit as f32) as usize;
        (lo, hi.max(lo))
    }

    fn fill_span(&mut self, rect: Rect, color: Color) {
        if !(rect.width > 0.0 && rect.height > 0.0) {
            return;
        }

        let (x0, x1) = Self::span(rect.x, rect.width, self.width);
        let (y0, y1) = Self::span(rect.y, rect.height, self.height);
        let rgba = [color.r, color.g, color.b, color.a];

        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, rgba);
            }
        }
    }
}

impl Surface for Framebuffer<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        let rgba = [color.r, color.g, color.b, color.a];
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_span(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        if !(width > 0.0) {
            return;
        }

        let half = width / 2.0;
        let outer = Rect::new(rect.x - half, rect.y - half, rect.width + width, rect.height + width);
        let inner_height = (rect.height - width).max(0.0);

        // Top and bottom bands span the full outer width; the sides fill
        // the gap between them
        self.fill_span(Rect::new(outer.x, outer.y, outer.width, width), color);
        self.fill_span(
            Rect::new(outer.x, rect.y + rect.height - half, outer.width, width),
            color,
        );
        self.fill_span(Rect::new(outer.x, rect.y + half, width, inner_height), color);
        self.fill_span(
            Rect::new(rect.x + rect.width - half, rect.y + half, width, inner_height),
            color,
        );
    }

    fn draw_image(&mut self, image: &Image, source: Option<SourceRect>, transform: Affine2) {
        let Some(region) = clip_source(image, source) else {
            return;
        };

        let inverse = transform.inverse();
        if !inverse.is_finite() {
            return;
        }

        // Screen-space bounds of the transformed region
        let (region_w, region_h) = (region.width as f32, region.height as f32);
        let corners = [
            Vec2::ZERO,
            Vec2::new(region_w, 0.0),
            Vec2::new(0.0, region_h),
            Vec2::new(region_w, region_h),
        ]
        .map(|corner| transform.transform_point2(corner));

        let min = corners.iter().fold(Vec2::splat(f32::INFINITY), |acc, p| acc.min(*p));
        let max = corners.iter().fold(Vec2::splat(f32::NEG_INFINITY), |acc, p| acc.max(*p));

        let (x0, x1) = Self::span(min.x, max.x - min.x, self.width);
        let (y0, y1) = Self::span(min.y, max.y - min.y, self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let centre = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let local = inverse.transform_point2(centre);
                if local.x < 0.0 || local.y < 0.0 || local.x >= region_w || local.y >= region_h {
                    continue;
                }

                let sx = region.x + local.x as u32;
                let sy = region.y + local.y as u32;
                if let Some(texel) = image.get_pixel_checked(sx, sy) {
                    self.blend(x, y, texel.0);
                }
            }
        }
    }
}

/// Intersects the requested region with the image bounds.
fn clip_source(image: &Image, source: Option<SourceRect>) -> Option<SourceRect> {
    let (image_w, image_h) = image.dimensions();
    let region = source.unwrap_or(SourceRect::new(0, 0, image_w, image_h));

    if region.x >= image_w || region.y >= image_h {
        return None;
    }

    let width = region.width.min(image_w - region.x);
    let height = region.height.min(image_h - region.y);
    (width > 0 && height > 0).then_some(SourceRect::new(region.x, region.y, width, height))
}

//=========================================================================
// Unit Tests
//=========================================================================
