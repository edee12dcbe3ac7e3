//! Flat per-pixel buffer of palette indices.

use crate::error::{Result, TbinError};

use super::DEFAULT_TRANSPARENT_INDEX;

/// A row-major buffer of palette colour indices spanning a whole sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Layer {
    /// Create a blank layer, every pixel set to the default transparent index.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, DEFAULT_TRANSPARENT_INDEX)
    }

    /// Create a layer with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major pixel buffer.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(TbinError::LayerSize {
                width,
                height,
                actual_width: width,
                actual_height: pixels.len().checked_div(width).unwrap_or(0),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the index at (x, y), or `None` outside the layer.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Set the index at (x, y). Writes outside the layer are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }

    /// Fill a rectangle, clipped to the layer.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, value: u8) {
        for py in y..(y + h).min(self.height) {
            for px in x..(x + w).min(self.width) {
                self.pixels[py * self.width + px] = value;
            }
        }
    }

    /// The raw row-major buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
