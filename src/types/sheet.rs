//! Sprite sheet: a grid of tiles over one or more indexed-colour layers.

use crate::error::{Result, TbinError};

use super::{ColorScheme, Layer, Palette, PaletteId, TileColorScheme, PALETTE_SIZE};

/// Largest grid or tile dimension the format can describe (one nibble, minus one).
pub const MAX_DIMENSION: usize = 16;

/// An indexed-colour sprite sheet.
///
/// The sheet is `columns` x `rows` tiles of `tile_width` x `tile_height`
/// pixels. Every layer spans the whole sheet. Palettes are owned by the
/// sheet and addressed through the [`PaletteId`] handles returned by
/// [`SpriteSheet::add_palette`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    columns: usize,
    rows: usize,
    tile_width: usize,
    tile_height: usize,
    layers: Vec<Layer>,
    palettes: Vec<Palette>,
    scheme: ColorScheme,
}

impl SpriteSheet {
    /// Create a sheet with one blank layer and no palettes.
    pub fn new(columns: usize, rows: usize, tile_width: usize, tile_height: usize) -> Result<Self> {
        check_dimension("grid columns", columns)?;
        check_dimension("grid rows", rows)?;
        check_dimension("tile width", tile_width)?;
        check_dimension("tile height", tile_height)?;

        Ok(Self {
            columns,
            rows,
            tile_width,
            tile_height,
            layers: vec![Layer::new(columns * tile_width, rows * tile_height)],
            palettes: Vec::new(),
            scheme: ColorScheme::default(),
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    pub fn tile_height(&self) -> usize {
        self.tile_height
    }

    /// Total width in pixels.
    pub fn pixel_width(&self) -> usize {
        self.columns * self.tile_width
    }

    /// Total height in pixels.
    pub fn pixel_height(&self) -> usize {
        self.rows * self.tile_height
    }

    /// Number of tile cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Top-left pixel of a logical tile.
    pub fn tile_origin(&self, tile: usize) -> (usize, usize) {
        let row = tile / self.columns;
        let col = tile % self.columns;
        (col * self.tile_width, row * self.tile_height)
    }

    /// Add a palette, returning its handle.
    pub fn add_palette(&mut self, palette: Palette) -> Result<PaletteId> {
        if self.palettes.len() == PALETTE_SIZE {
            return Err(TbinError::CountOverflow {
                what: "palettes",
                count: PALETTE_SIZE + 1,
                limit: PALETTE_SIZE,
            });
        }
        self.palettes.push(palette);
        Ok(PaletteId((self.palettes.len() - 1) as u8))
    }

    pub fn palette(&self, id: PaletteId) -> Option<&Palette> {
        self.palettes.get(id.0 as usize)
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Select the palette used by tiles without an override.
    pub fn set_default_palette(&mut self, id: PaletteId) -> Result<()> {
        self.check_palette(id)?;
        self.scheme.default_palette = id;
        Ok(())
    }

    /// Override the palette and transparent index of one tile.
    pub fn set_tile_scheme(&mut self, tile: usize, scheme: TileColorScheme) -> Result<()> {
        self.check_tile(tile)?;
        self.check_palette(scheme.palette)?;
        if scheme.transparent_index as usize >= PALETTE_SIZE {
            return Err(TbinError::Usage {
                message: format!(
                    "Transparent colour index {} does not fit in 4 bits",
                    scheme.transparent_index
                ),
                help: Some("Colour indices must be in 0..=15".to_string()),
            });
        }
        self.scheme.insert_override(tile, scheme);
        Ok(())
    }

    /// The palette and transparent index a tile resolves to.
    pub fn resolve(&self, tile: usize) -> TileColorScheme {
        self.scheme.resolve(tile)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    /// Add a blank layer on top, returning its index.
    pub fn add_layer(&mut self) -> usize {
        self.layers
            .push(Layer::new(self.pixel_width(), self.pixel_height()));
        self.layers.len() - 1
    }

    /// Add an existing layer on top. It must span the whole sheet.
    pub fn push_layer(&mut self, layer: Layer) -> Result<usize> {
        if layer.width() != self.pixel_width() || layer.height() != self.pixel_height() {
            return Err(TbinError::LayerSize {
                width: self.pixel_width(),
                height: self.pixel_height(),
                actual_width: layer.width(),
                actual_height: layer.height(),
            });
        }
        self.layers.push(layer);
        Ok(self.layers.len() - 1)
    }

    /// Replace all layers with a single one.
    pub fn replace_layers(&mut self, layer: Layer) -> Result<()> {
        self.layers.clear();
        if let Err(e) = self.push_layer(layer) {
            self.add_layer();
            return Err(e);
        }
        Ok(())
    }

    /// The visible index at (x, y) once layers are stacked.
    ///
    /// Later layers draw over earlier ones; a pixel equal to `transparent`
    /// lets the layer beneath show through.
    pub fn composite_pixel(&self, x: usize, y: usize, transparent: u8) -> u8 {
        self.layers
            .iter()
            .rev()
            .filter_map(|layer| layer.get(x, y))
            .find(|&value| value != transparent)
            .unwrap_or(transparent)
    }

    /// Collapse every layer into one, using each tile's own transparent index.
    pub fn flatten(&self) -> Layer {
        let mut flat = Layer::new(self.pixel_width(), self.pixel_height());
        for tile in 0..self.cell_count() {
            let transparent = self.resolve(tile).transparent_index;
            let (ox, oy) = self.tile_origin(tile);
            for y in oy..oy + self.tile_height {
                for x in ox..ox + self.tile_width {
                    flat.set(x, y, self.composite_pixel(x, y, transparent));
                }
            }
        }
        flat
    }

    fn check_palette(&self, id: PaletteId) -> Result<()> {
        if self.palette(id).is_none() {
            return Err(TbinError::UnknownPalette { id: id.0 });
        }
        Ok(())
    }

    fn check_tile(&self, tile: usize) -> Result<()> {
        if tile >= self.cell_count() {
            return Err(TbinError::TileOutOfRange {
                tile,
                cells: self.cell_count(),
            });
        }
        Ok(())
    }
}

fn check_dimension(what: &'static str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_DIMENSION {
        return Err(TbinError::DimensionOutOfRange { what, value });
    }
    Ok(())
}
