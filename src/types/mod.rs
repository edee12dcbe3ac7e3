//! Core domain types for tbin.
//!
//! This module contains the sprite sheet model the codec reads and writes:
//! - `Colour` - 24-bit RGB colour values
//! - `Palette` - up to 16 colours, addressed by `PaletteId`
//! - `Layer` - flat per-pixel palette indices
//! - `ColorScheme` - default palette plus per-tile overrides
//! - `SpriteSheet` - the tile grid tying them together

mod colour;
mod layer;
mod palette;
mod scheme;
mod sheet;

pub use colour::Colour;
pub use layer::Layer;
pub use palette::{Palette, PaletteId, PALETTE_SIZE};
pub use scheme::{ColorScheme, TileColorScheme, DEFAULT_TRANSPARENT_INDEX};
pub use sheet::{SpriteSheet, MAX_DIMENSION};
