//! Pixel-recording draw target for renderer tests.

use alloc::{vec, vec::Vec};

use embedded_graphics::{pixelcolor::Rgb888, prelude::*, Pixel};

pub struct TestCanvas {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl TestCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb888::BLACK; (width * height) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb888 {
        self.pixels[(y * self.size.width + x) as usize]
    }

    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y) != Rgb888::BLACK
    }

    pub fn lit_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.size.width;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, &color)| color != Rgb888::BLACK)
            .map(move |(index, _)| (index as u32 % width, index as u32 / width))
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&c| c != Rgb888::BLACK).count()
    }

    pub fn column_lit_count(&self, x: u32) -> u32 {
        (0..self.size.height).filter(|&y| self.is_lit(x, y)).count() as u32
    }
}

impl OriginDimensions for TestCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for TestCanvas {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && point.y >= 0
                && (point.x as u32) < self.size.width
                && (point.y as u32) < self.size.height
            {
                self.pixels[(point.y as u32 * self.size.width + point.x as u32) as usize] = color;
            }
        }
        Ok(())
    }
}
