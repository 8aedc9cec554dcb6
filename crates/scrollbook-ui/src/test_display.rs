//! Test display that allows pixel overdraw.
//!
//! `MockDisplay` from embedded-graphics panics when a pixel is drawn twice,
//! which doesn't work for screens that clear backgrounds then draw on top.
//! This simple framebuffer display allows overdraw for render smoke-tests,
//! and exposes region queries so tests can assert where ink landed.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};

/// Simple framebuffer display for tests that allows overdraw.
pub struct TestDisplay {
    pixels: Vec<BinaryColor>,
    width: u32,
    height: u32,
}

impl TestDisplay {
    /// Create a new test display with the given dimensions.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
        }
    }

    /// Create a display matching the book page dimensions (480x800).
    pub fn new() -> Self {
        Self::with_size(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw framebuffer in row-major order.
    pub fn pixels(&self) -> &[BinaryColor] {
        &self.pixels
    }

    /// Color at (x, y); Off outside the framebuffer.
    pub fn pixel_at(&self, x: i32, y: i32) -> BinaryColor {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return BinaryColor::Off;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize]
    }

    /// Count of lit pixels inside `rect` (clipped to the framebuffer).
    pub fn lit_in_rect(&self, rect: Rectangle) -> usize {
        self.count_lit(|point| rect.contains(point))
    }

    /// Count of lit pixels outside `rect`.
    pub fn lit_outside_rect(&self, rect: Rectangle) -> usize {
        self.count_lit(|point| !rect.contains(point))
    }

    /// Whether any pixel in row `y` is lit.
    pub fn row_has_ink(&self, y: i32) -> bool {
        if y < 0 || y as u32 >= self.height {
            return false;
        }
        let start = (y as u32 * self.width) as usize;
        self.pixels[start..start + self.width as usize]
            .iter()
            .any(|&p| p == BinaryColor::On)
    }

    fn count_lit(&self, mut keep: impl FnMut(Point) -> bool) -> usize {
        let mut count = 0;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.pixel_at(x, y) == BinaryColor::On && keep(Point::new(x, y)) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl Default for TestDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for TestDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as u32) < self.width
                && (coord.y as u32) < self.height
            {
                let idx = (coord.y as u32 * self.width + coord.x as u32) as usize;
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
