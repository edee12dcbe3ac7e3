//! PNG import and preview.
//!
//! Bridges RGBA images and indexed sprite sheets so a TBIN file can be
//! produced from, and checked against, an ordinary PNG.

use std::collections::HashMap;
use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{Result, TbinError};
use crate::types::{
    Colour, Layer, Palette, PaletteId, SpriteSheet, TileColorScheme, DEFAULT_TRANSPARENT_INDEX,
    PALETTE_SIZE,
};

/// Build a single-palette sheet from an RGBA image.
///
/// Fully transparent pixels become `transparent_index`. Other pixels are
/// assigned palette slots in first-seen order, skipping the transparent
/// slot, so at most 15 distinct colours fit. Alpha is otherwise ignored.
pub fn sheet_from_image(
    img: &RgbaImage,
    tile_width: usize,
    tile_height: usize,
    transparent_index: u8,
) -> Result<SpriteSheet> {
    let (width, height) = (img.width() as usize, img.height() as usize);

    if transparent_index as usize >= PALETTE_SIZE {
        return Err(TbinError::Usage {
            message: format!("Transparent index {} does not fit in 4 bits", transparent_index),
            help: Some("Use a value in 0..=15".to_string()),
        });
    }
    if tile_width == 0 || tile_height == 0 || width % tile_width != 0 || height % tile_height != 0
    {
        return Err(TbinError::Image {
            message: format!(
                "Image size {}x{} is not a multiple of the {}x{} tile size",
                width, height, tile_width, tile_height
            ),
            help: Some("Crop or pad the image to whole tiles".to_string()),
        });
    }

    let mut sheet = SpriteSheet::new(
        width / tile_width,
        height / tile_height,
        tile_width,
        tile_height,
    )?;

    let mut slots = [Colour::BLACK; PALETTE_SIZE];
    let mut used = transparent_index as usize + 1;
    let mut lookup: HashMap<Colour, u8> = HashMap::new();
    let mut free = (0..PALETTE_SIZE as u8).filter(|&slot| slot != transparent_index);

    let mut pixels = Vec::with_capacity(width * height);
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            pixels.push(transparent_index);
            continue;
        }

        let colour = Colour::rgb(r, g, b);
        let slot = match lookup.get(&colour) {
            Some(&slot) => slot,
            None => {
                let slot = free.next().ok_or_else(|| TbinError::Image {
                    message: format!(
                        "Image uses more than {} opaque colours",
                        PALETTE_SIZE - 1
                    ),
                    help: Some("Reduce the image to a 15-colour palette first".to_string()),
                })?;
                slots[slot as usize] = colour;
                used = used.max(slot as usize + 1);
                lookup.insert(colour, slot);
                slot
            }
        };
        pixels.push(slot);
    }

    let palette = Palette::from_colours("imported", slots[..used].iter().copied())?;
    let id = sheet.add_palette(palette)?;
    sheet.replace_layers(Layer::from_pixels(width, height, pixels)?)?;

    if transparent_index != DEFAULT_TRANSPARENT_INDEX {
        for tile in 0..sheet.cell_count() {
            sheet.set_tile_scheme(tile, TileColorScheme::new(id, transparent_index))?;
        }
    }

    Ok(sheet)
}

/// Render a sheet to RGBA with integer upscaling.
///
/// Each tile is drawn through its own palette; pixels equal to the tile's
/// transparent index come out fully transparent. Indices past the end of
/// a palette render as magenta.
pub fn sheet_to_image(sheet: &SpriteSheet, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let flat = sheet.flatten();

    let width = flat.width() as u32 * scale;
    let height = flat.height() as u32 * scale;
    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for y in 0..flat.height() {
        for x in 0..flat.width() {
            let tile = (y / sheet.tile_height()) * sheet.columns() + x / sheet.tile_width();
            let scheme = sheet.resolve(tile);
            let value = flat.get(x, y).unwrap_or(scheme.transparent_index);

            let rgba = if value == scheme.transparent_index {
                Rgba([0, 0, 0, 0])
            } else {
                let colour = palette_colour(sheet, scheme.palette, value);
                Rgba(colour.to_rgba())
            };

            for sy in 0..scale {
                for sx in 0..scale {
                    img.put_pixel(x as u32 * scale + sx, y as u32 * scale + sy, rgba);
                }
            }
        }
    }

    img
}

fn palette_colour(sheet: &SpriteSheet, id: PaletteId, slot: u8) -> Colour {
    sheet
        .palette(id)
        .and_then(|p| p.get(slot))
        .unwrap_or(Colour::MAGENTA)
}

/// Load a PNG as RGBA.
pub fn load_png(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(e) => TbinError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to load image: {}", e),
        },
        other => TbinError::Image {
            message: format!("{} is not a readable image: {}", path.display(), other),
            help: Some("Encode expects a PNG sprite sheet".to_string()),
        },
    })?;
    Ok(img.to_rgba8())
}

/// Save an RGBA image as PNG.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| TbinError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}
