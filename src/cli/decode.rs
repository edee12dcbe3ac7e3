//! Decode command implementation.
//!
//! Reads a TBIN file and renders it to a PNG preview.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::codec::read_tbin;
use crate::config::Config;
use crate::convert::{sheet_to_image, write_png};
use crate::error::{Result, TbinError};
use crate::output::{display_path, plural, Printer};

/// Decode a TBIN file and render it to PNG
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// TBIN file to decode
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output PNG (default: <output dir>/<input stem>.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor for output (integer upscaling)
    #[arg(long)]
    pub scale: Option<u32>,
}

pub fn run(args: DecodeArgs, config: &Config, printer: &Printer) -> Result<PathBuf> {
    printer.status("Decoding", &display_path(&args.input));
    let sheet = read_tbin(&args.input)?;

    let overrides = sheet.scheme().overrides().count();
    printer.info(
        "Decoded",
        &format!(
            "{}x{} tiles of {}x{}, {}, {}",
            sheet.columns(),
            sheet.rows(),
            sheet.tile_width(),
            sheet.tile_height(),
            plural(sheet.palettes().len(), "palette", "palettes"),
            plural(overrides, "tile override", "tile overrides")
        ),
    );

    let scale = args.scale.unwrap_or_else(|| config.effective_scale());
    let img = sheet_to_image(&sheet, scale);

    let output = args.output.unwrap_or_else(|| {
        let stem = args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sheet");
        config.output.join(format!("{}.png", stem))
    });

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| TbinError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    write_png(&img, &output)?;
    printer.status(
        "Finished",
        &format!(
            "{} {}",
            printer.cyan(&display_path(&output)),
            printer.dim(&format!("({}x{})", img.width(), img.height()))
        ),
    );

    Ok(output)
}
