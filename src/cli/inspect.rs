//! Inspect command implementation.
//!
//! Prints the header, section layout and tile placement of TBIN files.
//! Files that are not TBIN at all are reported and skipped, so a mixed
//! batch of files can be inspected in one go.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::codec::{inspect, TbinInfo, MAGIC};
use crate::error::{Result, TbinError};
use crate::output::{display_path, plural, Printer};

/// Show the header and layout of TBIN files
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// TBIN files to inspect
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print machine-readable JSON to stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: InspectArgs, printer: &Printer) -> Result<Vec<TbinInfo>> {
    let mut found = Vec::new();

    for path in &args.files {
        let display = display_path(path);
        let bytes = fs::read(path).map_err(|e| TbinError::Io {
            path: path.clone(),
            message: format!("Failed to read file: {}", e),
        })?;

        match inspect(&bytes) {
            Ok(info) => {
                if !args.json {
                    println!("{}", render(&display, &info));
                }
                found.push(info);
            }
            Err(e) if e.is_unrecognised() => {
                printer.warning("Skipping", &format!("{} ({})", display, e));
            }
            Err(e) => return Err(e),
        }
    }

    if found.is_empty() {
        return Err(TbinError::Format {
            message: format!(
                "none of the {} is a TBIN file",
                plural(args.files.len(), "file", "files")
            ),
            help: Some(format!(
                "TBIN files start with {:02X} {:02X} {:02X} {:02X}",
                MAGIC[0], MAGIC[1], MAGIC[2], MAGIC[3]
            )),
        });
    }

    if args.json {
        let json = serde_json::to_string_pretty(&found).map_err(|e| TbinError::Usage {
            message: format!("Failed to serialize inspection: {}", e),
            help: None,
        })?;
        println!("{}", json);
    }

    Ok(found)
}

/// Human-readable summary of one file.
fn render(name: &str, info: &TbinInfo) -> String {
    let h = &info.header;
    let l = &info.layout;
    let mut out = String::new();

    out.push_str(&format!("{} ({} bytes, version {})\n", name, info.byte_len, h.version));
    out.push_str(&format!(
        "  grid      {}x{} tiles of {}x{}\n",
        h.columns, h.rows, h.tile_width, h.tile_height
    ));
    out.push_str(&format!(
        "  palettes  {} at offset {}\n",
        h.palette_count, l.palette_offset
    ));
    out.push_str(&format!(
        "  remap     {} at offset {}\n",
        plural(h.remap_count as usize, "entry", "entries"),
        l.remap_offset
    ));
    out.push_str(&format!(
        "  tiles     {} stored, {} empty, {} bytes each at offset {}\n",
        h.tile_count,
        info.empty_cells(),
        l.tile_record_len,
        l.tile_offset
    ));

    for (i, palette) in info.palettes.iter().enumerate() {
        let colours: Vec<String> = palette.colours().iter().map(|c| c.to_string()).collect();
        out.push_str(&format!("  palette {:>2}  {}\n", i, colours.join(" ")));
    }
    for tile in &info.tiles {
        out.push_str(&format!(
            "  tile {:>3} -> cell {:>3} (row {}, col {})  palette {}  transparent {}\n",
            tile.physical,
            tile.logical,
            tile.logical / h.columns,
            tile.logical % h.columns,
            tile.palette,
            tile.transparent_index
        ));
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode, write_tbin};
    use crate::types::{Colour, Palette, SpriteSheet};
    use tempfile::tempdir;

    fn sample() -> SpriteSheet {
        let mut sheet = SpriteSheet::new(2, 1, 2, 2).unwrap();
        sheet
            .add_palette(Palette::from_colours("p", [Colour::WHITE]).unwrap())
            .unwrap();
        sheet.layer_mut(0).unwrap().set(2, 0, 0);
        sheet
    }

    #[test]
    fn test_render_summary() {
        let info = inspect(&encode(&sample()).unwrap()).unwrap();
        let text = render("a.tbin", &info);

        assert!(text.starts_with("a.tbin (47 bytes, version 0)"));
        assert!(text.contains("grid      2x1 tiles of 2x2"));
        assert!(text.contains("remap     1 entry at offset 42"));
        assert!(text.contains("tiles     1 stored, 1 empty, 3 bytes each at offset 44"));
        assert!(text.contains("tile   0 -> cell   1 (row 0, col 1)  palette 0  transparent 2"));
    }

    #[test]
    fn test_skips_unrecognised_files() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.tbin");
        let bad = dir.path().join("bad.bin");
        write_tbin(&sample(), &good).unwrap();
        fs::write(&bad, [0u8; 16]).unwrap();

        let args = InspectArgs {
            files: vec![bad, good],
            json: true,
        };
        let found = run(args, &Printer::plain()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].header.tile_count, 1);
    }

    #[test]
    fn test_all_unrecognised_is_an_error() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.bin");
        fs::write(&bad, b"PNG?").unwrap();

        let args = InspectArgs {
            files: vec![bad],
            json: false,
        };
        let err = run(args, &Printer::plain()).unwrap_err();
        assert!(err.is_unrecognised());
    }

    #[test]
    fn test_damaged_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cut.tbin");
        let bytes = encode(&sample()).unwrap();
        fs::write(&path, &bytes[..20]).unwrap();

        let args = InspectArgs {
            files: vec![path],
            json: true,
        };
        assert!(matches!(
            run(args, &Printer::plain()),
            Err(TbinError::Truncated { .. })
        ));
    }

    #[test]
    fn test_damaged_remap_is_an_error() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.tbin");
        let damaged = dir.path().join("damaged.tbin");
        write_tbin(&sample(), &good).unwrap();

        let mut bytes = encode(&sample()).unwrap();
        // Remap entry logical index, pointed past the 2-cell grid.
        assert_eq!(bytes[42], 1);
        bytes[42] = 9;
        fs::write(&damaged, &bytes).unwrap();

        let args = InspectArgs {
            files: vec![damaged, good],
            json: true,
        };
        let err = run(args, &Printer::plain()).unwrap_err();
        assert!(matches!(err, TbinError::Corrupt { .. }));
        assert!(!err.is_unrecognised());
    }
}
