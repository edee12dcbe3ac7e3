//! Tile scanning and sparse packing.
//!
//! Walks the tile grid once in row-major order. Each tile becomes a record
//! of one header byte (palette index, transparent index) and its packed
//! pixels. Tiles whose every pixel equals their own transparent index are
//! dropped from the stream. A stored tile whose stream position no longer
//! matches its grid position, because earlier tiles were dropped, gets a
//! remap entry.

use serde::Serialize;

use crate::error::{Result, TbinError};
use crate::types::{SpriteSheet, PALETTE_SIZE};

use super::nibble;

/// Pack a tile's palette index and transparent index into its header byte.
pub fn tile_header(palette: u8, transparent_index: u8) -> u8 {
    (palette & 0x0F) << 4 | (transparent_index & 0x0F)
}

/// Split a tile header byte into (palette index, transparent index).
pub fn split_tile_header(byte: u8) -> (u8, u8) {
    (byte >> 4, byte & 0x0F)
}

/// Maps a stored tile back to its grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemapEntry {
    pub logical: u8,
    pub physical: u8,
}

impl RemapEntry {
    /// Big-endian u16: logical in the high byte, physical in the low byte.
    pub fn to_bytes(self) -> [u8; 2] {
        (u16::from(self.logical) << 8 | u16::from(self.physical)).to_be_bytes()
    }

    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        let value = u16::from_be_bytes(bytes);
        Self {
            logical: (value >> 8) as u8,
            physical: value as u8,
        }
    }
}

/// One non-empty tile, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    /// Row-major grid index.
    pub logical: usize,
    pub header: u8,
    /// Packed pixels, `ceil(w * h / 2)` bytes.
    pub payload: Vec<u8>,
}

impl TileRecord {
    pub fn write(&self, out: &mut Vec<u8>) {
        out.push(self.header);
        out.extend_from_slice(&self.payload);
    }
}

/// Result of a scan: stored tiles in stream order plus the remap table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseTiles {
    pub tiles: Vec<TileRecord>,
    pub remap: Vec<RemapEntry>,
}

/// Scan a sheet into its sparse tile stream.
pub fn scan(sheet: &SpriteSheet) -> Result<SparseTiles> {
    let mut sparse = SparseTiles::default();
    let mut shift = 0usize;
    let area = sheet.tile_width() * sheet.tile_height();

    for logical in 0..sheet.cell_count() {
        let scheme = sheet.resolve(logical);
        let transparent = scheme.transparent_index;

        let pixels = tile_pixels(sheet, logical, transparent)?;
        if pixels.iter().all(|&p| p == transparent) {
            shift += 1;
            continue;
        }

        if sheet.palette(scheme.palette).is_none() {
            return Err(TbinError::UnknownPalette {
                id: scheme.palette.index(),
            });
        }

        let physical = logical - shift;
        if physical != logical {
            sparse.remap.push(RemapEntry {
                logical: logical as u8,
                physical: physical as u8,
            });
        }

        let mut payload = Vec::with_capacity(nibble::packed_len(area));
        nibble::pack_into(&mut payload, pixels, transparent);
        sparse.tiles.push(TileRecord {
            logical,
            header: tile_header(scheme.palette.index(), transparent),
            payload,
        });
    }

    Ok(sparse)
}

/// Visible pixels of one tile, row by row, checked to fit in a nibble.
fn tile_pixels(sheet: &SpriteSheet, tile: usize, transparent: u8) -> Result<Vec<u8>> {
    let (ox, oy) = sheet.tile_origin(tile);
    let mut pixels = Vec::with_capacity(sheet.tile_width() * sheet.tile_height());

    for y in oy..oy + sheet.tile_height() {
        for x in ox..ox + sheet.tile_width() {
            let value = sheet.composite_pixel(x, y, transparent);
            if value as usize >= PALETTE_SIZE {
                return Err(TbinError::PixelOutOfRange { x, y, value });
            }
            pixels.push(value);
        }
    }

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, Palette, TileColorScheme};

    /// 4x1 grid of 2x2 tiles with one palette.
    fn strip() -> SpriteSheet {
        let mut sheet = SpriteSheet::new(4, 1, 2, 2).unwrap();
        sheet
            .add_palette(Palette::from_colours("p", [Colour::BLACK, Colour::WHITE]).unwrap())
            .unwrap();
        sheet
    }

    fn paint_tile(sheet: &mut SpriteSheet, tile: usize, value: u8) {
        let (x, y) = sheet.tile_origin(tile);
        sheet.layer_mut(0).unwrap().set(x, y, value);
    }

    #[test]
    fn test_header_byte() {
        assert_eq!(tile_header(0, 2), 0x02);
        assert_eq!(tile_header(3, 15), 0x3F);
        assert_eq!(split_tile_header(0x3F), (3, 15));
    }

    #[test]
    fn test_remap_entry_bytes() {
        let entry = RemapEntry { logical: 7, physical: 2 };
        assert_eq!(entry.to_bytes(), [7, 2]);
        assert_eq!(RemapEntry::from_bytes([7, 2]), entry);
    }

    #[test]
    fn test_empty_sheet() {
        let sparse = scan(&strip()).unwrap();
        assert!(sparse.tiles.is_empty());
        assert!(sparse.remap.is_empty());
    }

    #[test]
    fn test_full_sheet_has_no_remap() {
        let mut sheet = strip();
        for tile in 0..4 {
            paint_tile(&mut sheet, tile, 1);
        }
        let sparse = scan(&sheet).unwrap();
        assert_eq!(sparse.tiles.len(), 4);
        assert!(sparse.remap.is_empty());
    }

    #[test]
    fn test_gap_produces_remap_entries() {
        let mut sheet = strip();
        paint_tile(&mut sheet, 0, 1);
        paint_tile(&mut sheet, 2, 1);
        paint_tile(&mut sheet, 3, 1);

        let sparse = scan(&sheet).unwrap();
        let logical: Vec<usize> = sparse.tiles.iter().map(|t| t.logical).collect();
        assert_eq!(logical, vec![0, 2, 3]);
        assert_eq!(
            sparse.remap,
            vec![
                RemapEntry { logical: 2, physical: 1 },
                RemapEntry { logical: 3, physical: 2 },
            ]
        );
    }

    #[test]
    fn test_record_payload() {
        let mut sheet = strip();
        paint_tile(&mut sheet, 1, 1);

        let sparse = scan(&sheet).unwrap();
        let record = &sparse.tiles[0];
        assert_eq!(record.header, 0x02);
        // Pixel (0,0) is 1, the rest are the transparent index 2.
        assert_eq!(record.payload, vec![0x12, 0x22]);
    }

    #[test]
    fn test_emptiness_uses_tile_transparency() {
        let mut sheet = strip();
        let id = crate::types::PaletteId::DEFAULT;
        // Tile 0 is all 2 but transparent on 0, so it is stored.
        sheet.set_tile_scheme(0, TileColorScheme::new(id, 0)).unwrap();
        // Tile 1 is all 0 and transparent on 0, so it is dropped.
        sheet.set_tile_scheme(1, TileColorScheme::new(id, 0)).unwrap();
        sheet.layer_mut(0).unwrap().fill_rect(2, 0, 2, 2, 0);

        let sparse = scan(&sheet).unwrap();
        assert_eq!(sparse.tiles.len(), 1);
        assert_eq!(sparse.tiles[0].logical, 0);
        assert_eq!(sparse.tiles[0].header, 0x00);
        assert_eq!(sparse.tiles[0].payload, vec![0x22, 0x22]);
    }

    #[test]
    fn test_pixel_out_of_range() {
        let mut sheet = strip();
        sheet.layer_mut(0).unwrap().set(5, 1, 16);
        assert!(matches!(
            scan(&sheet),
            Err(TbinError::PixelOutOfRange { x: 5, y: 1, value: 16 })
        ));
    }

    #[test]
    fn test_missing_palette() {
        let mut sheet = SpriteSheet::new(1, 1, 2, 2).unwrap();
        // Blank sheets need no palette.
        assert!(scan(&sheet).is_ok());
        sheet.layer_mut(0).unwrap().set(0, 0, 1);
        assert!(matches!(scan(&sheet), Err(TbinError::UnknownPalette { id: 0 })));
    }

    #[test]
    fn test_odd_tile_pads_with_transparent() {
        let mut sheet = SpriteSheet::new(1, 1, 3, 1).unwrap();
        sheet.add_palette(Palette::new("p")).unwrap();
        sheet.layer_mut(0).unwrap().set(0, 0, 5);

        let sparse = scan(&sheet).unwrap();
        assert_eq!(sparse.tiles[0].payload, vec![0x52, 0x22]);
    }
}
