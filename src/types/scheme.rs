//! Per-tile palette and transparency selection.

use std::collections::BTreeMap;

use serde::Serialize;

use super::PaletteId;

/// Transparent colour index used by tiles without an override.
pub const DEFAULT_TRANSPARENT_INDEX: u8 = 2;

/// Palette and transparent colour index resolved for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileColorScheme {
    pub palette: PaletteId,
    pub transparent_index: u8,
}

impl TileColorScheme {
    pub fn new(palette: PaletteId, transparent_index: u8) -> Self {
        Self {
            palette,
            transparent_index,
        }
    }
}

/// Sheet-wide default palette plus optional per-tile overrides.
///
/// Overrides are keyed by logical (row-major) tile index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorScheme {
    pub default_palette: PaletteId,
    overrides: BTreeMap<usize, TileColorScheme>,
}

impl ColorScheme {
    pub fn new(default_palette: PaletteId) -> Self {
        Self {
            default_palette,
            overrides: BTreeMap::new(),
        }
    }

    /// The scheme a tile uses: its override, or the sheet defaults.
    pub fn resolve(&self, tile: usize) -> TileColorScheme {
        self.overrides
            .get(&tile)
            .copied()
            .unwrap_or(TileColorScheme::new(
                self.default_palette,
                DEFAULT_TRANSPARENT_INDEX,
            ))
    }

    pub fn get_override(&self, tile: usize) -> Option<&TileColorScheme> {
        self.overrides.get(&tile)
    }

    pub(crate) fn insert_override(&mut self, tile: usize, scheme: TileColorScheme) {
        self.overrides.insert(tile, scheme);
    }

    /// Overrides in ascending tile order.
    pub fn overrides(&self) -> impl Iterator<Item = (usize, &TileColorScheme)> {
        self.overrides.iter().map(|(&tile, scheme)| (tile, scheme))
    }
}
