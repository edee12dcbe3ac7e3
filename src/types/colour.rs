//! Colour type.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::codec::rgb565;

/// A 24-bit RGB colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Red.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Magenta (used for missing/error placeholders).
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    /// Build a colour from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_u32(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Pack into a `0xRRGGBB` value.
    pub const fn to_u32(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Quantize to RGB565. Lossy: the low 3/2/3 bits of each channel are dropped.
    pub const fn to_rgb565(self) -> u16 {
        rgb565::to_rgb565(self.to_u32())
    }

    /// Expand an RGB565 value back to 24 bits (zero-filled low bits).
    pub const fn from_rgb565(value: u16) -> Self {
        Self::from_u32(rgb565::from_rgb565(value))
    }

    /// Convert to an opaque RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
