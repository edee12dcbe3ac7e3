//! Encode command implementation.
//!
//! Imports a PNG sprite sheet and writes it as a TBIN file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::codec::{scan, write_tbin};
use crate::config::Config;
use crate::convert::{load_png, sheet_from_image};
use crate::error::{Result, TbinError};
use crate::output::{byte_size, display_path, plural, Printer};

use super::parse_dimensions;

/// Encode a PNG sprite sheet as TBIN
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// PNG file to encode
    #[arg(required = true)]
    pub input: PathBuf,

    /// Tile size as WxH (e.g. 8x8); defaults to the config value
    #[arg(long)]
    pub tile: Option<String>,

    /// Output file (default: <output dir>/<input stem>.tbin)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Palette index for fully transparent pixels
    #[arg(long)]
    pub transparent: Option<u8>,
}

pub fn run(args: EncodeArgs, config: &Config, printer: &Printer) -> Result<PathBuf> {
    let (tile_w, tile_h) = match &args.tile {
        Some(tile) => parse_dimensions(tile)?,
        None => (config.tile[0], config.tile[1]),
    };
    let transparent = args.transparent.unwrap_or(config.transparent_index);

    printer.status("Loading", &display_path(&args.input));
    let img = load_png(&args.input)?;
    let sheet = sheet_from_image(&img, tile_w, tile_h, transparent)?;

    printer.status(
        "Encoding",
        &format!(
            "{}x{} tiles of {}x{}",
            sheet.columns(),
            sheet.rows(),
            tile_w,
            tile_h
        ),
    );

    let sparse = scan(&sheet)?;
    let skipped = sheet.cell_count() - sparse.tiles.len();
    if skipped > 0 {
        printer.info(
            "Packed",
            &format!(
                "{} ({} empty, skipped; {})",
                plural(sparse.tiles.len(), "tile", "tiles"),
                skipped,
                plural(sparse.remap.len(), "remap entry", "remap entries")
            ),
        );
    } else {
        printer.info("Packed", &plural(sparse.tiles.len(), "tile", "tiles"));
    }

    let output = match args.output {
        Some(path) => path,
        None => default_output(&args.input, &config.output),
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TbinError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let written = write_tbin(&sheet, &output)?;
    printer.status(
        "Finished",
        &format!("{} ({})", printer.cyan(&display_path(&output)), byte_size(written)),
    );

    Ok(output)
}

fn default_output(input: &Path, dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sheet");
    dir.join(format!("{}.tbin", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::read_tbin;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("art/hero.png"), Path::new("dist")),
            PathBuf::from("dist/hero.tbin")
        );
    }

    #[test]
    fn test_encode_png_to_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("hero.png");
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        img.put_pixel(3, 3, Rgba([255, 255, 255, 255]));
        img.save(&input).unwrap();

        let config = Config {
            output: dir.path().join("out"),
            ..Config::default()
        };
        let args = EncodeArgs {
            input,
            tile: Some("2x2".to_string()),
            output: None,
            transparent: None,
        };

        let output = run(args, &config, &Printer::plain()).unwrap();
        assert_eq!(output, dir.path().join("out").join("hero.tbin"));

        let sheet = read_tbin(&output).unwrap();
        assert_eq!((sheet.columns(), sheet.rows()), (2, 2));
        assert_eq!(sheet.layer(0).unwrap().get(3, 3), Some(0));
    }

    #[test]
    fn test_encode_rejects_bad_tile() {
        let dir = tempdir().unwrap();
        let args = EncodeArgs {
            input: dir.path().join("missing.png"),
            tile: Some("2by2".to_string()),
            output: None,
            transparent: None,
        };
        assert!(matches!(
            run(args, &Config::default(), &Printer::plain()),
            Err(TbinError::Usage { .. })
        ));
    }
}
