//! Display surfaces that widgets draw onto.

use crate::color::Color;
use crate::geometry::{Rect, Size};

/// A surface accepting primitive draw commands.
///
/// Widgets only ever see `&mut dyn Display` while handling a draw event.
pub trait Display {
    /// Fill `rect` (absolute, in surface pixels) with a solid color.
    fn fill_rect(&mut self, rect: Rect<f32>, color: Color);

    /// Drawable area of the surface.
    fn size(&self) -> Size<f32>;
}

/// Software ARGB8888 framebuffer.
///
/// Rectangles are rounded to whole pixels and clipped to the buffer bounds.
/// Blending is not performed; the last fill wins.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb8888());
    }
}

impl Display for Framebuffer {
    fn fill_rect(&mut self, rect: Rect<f32>, color: Color) {
        let bounds = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let Some(clipped) = rect.intersect(&bounds) else {
            return;
        };

        let x0 = clipped.x.round() as u32;
        let y0 = clipped.y.round() as u32;
        let x1 = (clipped.right().round() as u32).min(self.width);
        let y1 = (clipped.bottom().round() as u32).min(self.height);
        let value = color.to_argb8888();

        for y in y0..y1 {
            let row = (y * self.width) as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(value);
        }
    }

    fn size(&self) -> Size<f32> {
        Size::new(self.width as f32, self.height as f32)
    }
}
