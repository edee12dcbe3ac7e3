//! tbin - TBIN sprite sheet codec
//!
//! Encodes indexed-colour sprite sheets (16-colour palettes, per-tile
//! palette and transparency overrides) into the compact TBIN binary
//! format and decodes them back.

pub mod cli;
pub mod codec;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod types;

pub use codec::{decode, encode, inspect, read_tbin, write_tbin, TbinInfo};
pub use config::Config;
pub use convert::{sheet_from_image, sheet_to_image};
pub use error::{Result, TbinError};
pub use types::{
    ColorScheme, Colour, Layer, Palette, PaletteId, SpriteSheet, TileColorScheme,
    DEFAULT_TRANSPARENT_INDEX,
};
