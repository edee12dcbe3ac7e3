pub mod decode;
pub mod encode;
pub mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{Result, TbinError};
use crate::types::MAX_DIMENSION;

/// tbin - TBIN sprite sheet codec
#[derive(Parser, Debug)]
#[command(name = "tbin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./tbin.yaml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a PNG sprite sheet as TBIN
    Encode(encode::EncodeArgs),

    /// Decode a TBIN file and render it to PNG
    Decode(decode::DecodeArgs),

    /// Show the header and layout of TBIN files
    Inspect(inspect::InspectArgs),
}

/// Parse a "WxH" tile size string into (width, height).
pub fn parse_dimensions(s: &str) -> Result<(usize, usize)> {
    let parts: Vec<&str> = s.splitn(2, |c| c == 'x' || c == 'X').collect();
    if parts.len() != 2 {
        return Err(TbinError::Usage {
            message: format!("Invalid tile size '{}': expected WxH (e.g. 8x8)", s),
            help: Some("Use the format WxH, for example: 8x8, 8x16".to_string()),
        });
    }

    let w: usize = parts[0].parse().map_err(|_| TbinError::Usage {
        message: format!("Invalid width '{}' in tile size '{}'", parts[0], s),
        help: Some("Width must be a positive integer".to_string()),
    })?;

    let h: usize = parts[1].parse().map_err(|_| TbinError::Usage {
        message: format!("Invalid height '{}' in tile size '{}'", parts[1], s),
        help: Some("Height must be a positive integer".to_string()),
    })?;

    if !(1..=MAX_DIMENSION).contains(&w) || !(1..=MAX_DIMENSION).contains(&h) {
        return Err(TbinError::Usage {
            message: format!("Tile size must be 1 to {} per side, got {}x{}", MAX_DIMENSION, w, h),
            help: None,
        });
    }

    Ok((w, h))
}
