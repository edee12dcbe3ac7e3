//! TBIN encoding.

use std::fs;
use std::path::Path;

use crate::error::{Result, TbinError};
use crate::types::SpriteSheet;

use super::header::{Header, HEADER_LEN, MAX_COUNT, REMAP_ENTRY_LEN, VERSION};
use super::palette_table::{encode_palette, PALETTE_BLOCK_LEN};
use super::scan::scan;

/// Encode a sprite sheet into a TBIN buffer.
///
/// Layout: header, palette blocks, remap entries, then the stored tiles in
/// stream order. Empty tiles are omitted.
pub fn encode(sheet: &SpriteSheet) -> Result<Vec<u8>> {
    let sparse = scan(sheet)?;

    let header = Header {
        version: VERSION,
        columns: sheet.columns(),
        rows: sheet.rows(),
        tile_width: sheet.tile_width(),
        tile_height: sheet.tile_height(),
        palette_count: count_byte("palettes", sheet.palettes().len())?,
        remap_count: count_byte("remap entries", sparse.remap.len())?,
        tile_count: count_byte("stored tiles", sparse.tiles.len())?,
    };

    let len = HEADER_LEN
        + PALETTE_BLOCK_LEN * sheet.palettes().len()
        + REMAP_ENTRY_LEN * sparse.remap.len()
        + header.tile_record_len() * sparse.tiles.len();
    let mut out = Vec::with_capacity(len);

    header.write(&mut out);
    for palette in sheet.palettes() {
        out.extend_from_slice(&encode_palette(palette));
    }
    for entry in &sparse.remap {
        out.extend_from_slice(&entry.to_bytes());
    }
    for tile in &sparse.tiles {
        tile.write(&mut out);
    }

    debug_assert_eq!(out.len(), len);
    Ok(out)
}

/// Encode a sprite sheet and write it to a file.
pub fn write_tbin(sheet: &SpriteSheet, path: &Path) -> Result<usize> {
    let bytes = encode(sheet)?;

    fs::write(path, &bytes).map_err(|e| TbinError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write TBIN file: {}", e),
    })?;

    Ok(bytes.len())
}

fn count_byte(what: &'static str, count: usize) -> Result<u8> {
    u8::try_from(count).map_err(|_| TbinError::CountOverflow {
        what,
        count,
        limit: MAX_COUNT,
    })
}
