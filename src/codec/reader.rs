//! TBIN decoding.
//!
//! Every section is bounds-checked against the buffer before it is read,
//! and every stored tile is checked against the grid and the palette table,
//! so malformed input yields an error instead of garbage pixels.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, TbinError};
use crate::types::{
    Layer, Palette, PaletteId, SpriteSheet, TileColorScheme, DEFAULT_TRANSPARENT_INDEX,
    PALETTE_SIZE,
};

use super::header::{Header, Layout, REMAP_ENTRY_LEN};
use super::nibble;
use super::palette_table::{decode_palette, PALETTE_BLOCK_LEN};
use super::scan::{split_tile_header, RemapEntry};

/// A stored tile as found in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoredTile {
    /// Position in the tile stream.
    pub physical: usize,
    /// Grid cell, row-major.
    pub logical: usize,
    pub palette: u8,
    pub transparent_index: u8,
}

/// A validated view over a TBIN buffer.
pub(crate) struct Sections<'a> {
    pub header: Header,
    pub layout: Layout,
    pub palettes: Vec<Palette>,
    pub remap: Vec<RemapEntry>,
    pub tiles: Vec<(StoredTile, &'a [u8])>,
}

/// Decode a TBIN buffer into a sprite sheet.
///
/// The result has the stored palettes, a single layer, and a tile override
/// for every stored tile whose header differs from the sheet defaults.
/// Cells with no stored tile hold the default transparent index.
pub fn decode(bytes: &[u8]) -> Result<SpriteSheet> {
    let sections = parse_sections(bytes)?;
    let header = &sections.header;

    let mut sheet = SpriteSheet::new(
        header.columns,
        header.rows,
        header.tile_width,
        header.tile_height,
    )?;
    for palette in sections.palettes {
        sheet.add_palette(palette)?;
    }

    let mut layer = Layer::new(sheet.pixel_width(), sheet.pixel_height());
    let area = header.tile_width * header.tile_height;

    for (tile, payload) in &sections.tiles {
        let (ox, oy) = sheet.tile_origin(tile.logical);
        for (i, value) in nibble::unpack(payload).take(area).enumerate() {
            layer.set(ox + i % header.tile_width, oy + i / header.tile_width, value);
        }

        if tile.palette != PaletteId::DEFAULT.index()
            || tile.transparent_index != DEFAULT_TRANSPARENT_INDEX
        {
            sheet.set_tile_scheme(
                tile.logical,
                TileColorScheme::new(PaletteId(tile.palette), tile.transparent_index),
            )?;
        }
    }

    sheet.replace_layers(layer)?;
    Ok(sheet)
}

/// Read and decode a TBIN file.
pub fn read_tbin(path: &Path) -> Result<SpriteSheet> {
    let bytes = fs::read(path).map_err(|e| TbinError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;
    decode(&bytes)
}

pub(crate) fn parse_sections(bytes: &[u8]) -> Result<Sections<'_>> {
    let header = Header::parse(bytes)?;
    let layout = header.layout();

    // The tile header's palette nibble cannot address more.
    if header.palette_count as usize > PALETTE_SIZE {
        return Err(TbinError::CountOverflow {
            what: "palettes",
            count: header.palette_count as usize,
            limit: PALETTE_SIZE,
        });
    }

    let palette_bytes = section(bytes, "palette table", layout.palette_offset, layout.remap_offset)?;
    let remap_bytes = section(bytes, "remap table", layout.remap_offset, layout.tile_offset)?;
    let tile_bytes = section(bytes, "tile records", layout.tile_offset, layout.end)?;

    let palettes = palette_bytes
        .chunks_exact(PALETTE_BLOCK_LEN)
        .enumerate()
        .map(|(i, chunk)| {
            let mut block = [0u8; PALETTE_BLOCK_LEN];
            block.copy_from_slice(chunk);
            decode_palette(format!("palette-{}", i), &block)
        })
        .collect();

    let tile_count = header.tile_count as usize;
    let cells = header.cell_count();

    let mut remap = Vec::with_capacity(header.remap_count as usize);
    let mut logical_of: Vec<usize> = (0..tile_count).collect();
    for pair in remap_bytes.chunks_exact(REMAP_ENTRY_LEN) {
        let entry = RemapEntry::from_bytes([pair[0], pair[1]]);
        if entry.physical as usize >= tile_count {
            return Err(corrupt(format!(
                "remap entry points at stored tile {} of {}",
                entry.physical, tile_count
            )));
        }
        logical_of[entry.physical as usize] = entry.logical as usize;
        remap.push(entry);
    }

    let mut placed = vec![false; cells];
    let mut tiles = Vec::with_capacity(tile_count);
    for (physical, record) in tile_bytes.chunks_exact(layout.tile_record_len).enumerate() {
        let logical = logical_of[physical];
        if logical >= cells {
            return Err(corrupt(format!(
                "stored tile {} lands on cell {} of a {}-cell grid",
                physical, logical, cells
            )));
        }
        if std::mem::replace(&mut placed[logical], true) {
            return Err(corrupt(format!("grid cell {} is stored twice", logical)));
        }

        let (palette, transparent_index) = split_tile_header(record[0]);
        if palette >= header.palette_count {
            return Err(TbinError::PaletteIndexOutOfRange {
                tile: logical,
                index: palette,
                count: header.palette_count,
            });
        }

        tiles.push((
            StoredTile {
                physical,
                logical,
                palette,
                transparent_index,
            },
            &record[1..],
        ));
    }

    Ok(Sections {
        header,
        layout,
        palettes,
        remap,
        tiles,
    })
}

fn section<'a>(bytes: &'a [u8], name: &'static str, start: usize, end: usize) -> Result<&'a [u8]> {
    bytes.get(start..end).ok_or(TbinError::Truncated {
        section: name,
        needed: end - start,
        available: bytes.len().saturating_sub(start),
    })
}

fn corrupt(message: String) -> TbinError {
    TbinError::Corrupt { message }
}
