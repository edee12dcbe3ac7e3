//! Header and layout summary of a TBIN buffer, without decoding pixels.

use serde::Serialize;

use crate::error::Result;
use crate::types::Palette;

use super::header::{Header, Layout};
use super::reader::{parse_sections, StoredTile};
use super::scan::RemapEntry;

/// Everything a TBIN buffer declares, after validation.
#[derive(Debug, Clone, Serialize)]
pub struct TbinInfo {
    pub byte_len: usize,
    pub header: Header,
    pub layout: Layout,
    pub palettes: Vec<Palette>,
    pub remap: Vec<RemapEntry>,
    pub tiles: Vec<StoredTile>,
}

impl TbinInfo {
    /// Grid cells with no stored tile.
    pub fn empty_cells(&self) -> usize {
        self.header.cell_count() - self.tiles.len()
    }
}

/// Parse and validate a TBIN buffer, returning its declared structure.
pub fn inspect(bytes: &[u8]) -> Result<TbinInfo> {
    let sections = parse_sections(bytes)?;
    Ok(TbinInfo {
        byte_len: bytes.len(),
        header: sections.header,
        layout: sections.layout,
        palettes: sections.palettes,
        remap: sections.remap,
        tiles: sections.tiles.into_iter().map(|(tile, _)| tile).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use crate::types::{Colour, SpriteSheet};

    #[test]
    fn test_inspect_summary() {
        let mut sheet = SpriteSheet::new(3, 1, 2, 2).unwrap();
        sheet
            .add_palette(Palette::from_colours("p", [Colour::WHITE]).unwrap())
            .unwrap();
        sheet.layer_mut(0).unwrap().set(4, 0, 0);

        let info = inspect(&encode(&sheet).unwrap()).unwrap();
        assert_eq!(info.byte_len, 10 + 32 + 2 + 3);
        assert_eq!(info.header.tile_count, 1);
        assert_eq!(info.empty_cells(), 2);
        assert_eq!(info.remap, vec![RemapEntry { logical: 2, physical: 0 }]);
        assert_eq!(info.tiles[0].logical, 2);
        assert_eq!(info.tiles[0].physical, 0);
        assert_eq!(info.palettes[0].len(), 16);
    }

    #[test]
    fn test_inspect_json() {
        let sheet = SpriteSheet::new(1, 1, 2, 2).unwrap();
        let info = inspect(&encode(&sheet).unwrap()).unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["header"]["columns"], 1);
        assert_eq!(json["layout"]["end"], 10);
        assert_eq!(json["tiles"].as_array().unwrap().len(), 0);
    }
}
