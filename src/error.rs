use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tbin operations
#[derive(Error, Diagnostic, Debug)]
pub enum TbinError {
    #[error("Not a TBIN buffer: {message}")]
    #[diagnostic(code(tbin::format))]
    Format {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Truncated buffer: {section} needs {needed} bytes, {available} available")]
    #[diagnostic(
        code(tbin::truncated),
        help("The file was cut short or its header counts are corrupt")
    )]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Corrupt TBIN buffer: {message}")]
    #[diagnostic(
        code(tbin::corrupt),
        help("The remap table does not match the stored tiles")
    )]
    Corrupt { message: String },

    #[error("Tile {tile} references palette {index}, but only {count} palette(s) are stored")]
    #[diagnostic(code(tbin::palette_index))]
    PaletteIndexOutOfRange { tile: usize, index: u8, count: u8 },

    #[error("{what} of {value} is out of range (expected 1..=16)")]
    #[diagnostic(code(tbin::dimension))]
    DimensionOutOfRange { what: &'static str, value: usize },

    #[error("Pixel ({x}, {y}) holds colour index {value}, which does not fit in 4 bits")]
    #[diagnostic(code(tbin::pixel), help("Colour indices must be in 0..=15"))]
    PixelOutOfRange { x: usize, y: usize, value: u8 },

    #[error("Too many {what}: {count} (limit {limit})")]
    #[diagnostic(code(tbin::count))]
    CountOverflow {
        what: &'static str,
        count: usize,
        limit: usize,
    },

    #[error("Unknown palette {id}")]
    #[diagnostic(code(tbin::palette))]
    UnknownPalette { id: u8 },

    #[error("Tile {tile} is outside the {cells}-tile grid")]
    #[diagnostic(code(tbin::tile))]
    TileOutOfRange { tile: usize, cells: usize },

    #[error("Layer is {actual_width}x{actual_height}, sheet needs {width}x{height}")]
    #[diagnostic(code(tbin::layer))]
    LayerSize {
        width: usize,
        height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("{message}")]
    #[diagnostic(code(tbin::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tbin::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Image error: {message}")]
    #[diagnostic(code(tbin::image))]
    Image {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(tbin::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl TbinError {
    /// True for the errors that mean "this is not a TBIN file at all"
    /// (bad magic or an unknown version), as opposed to a TBIN file that
    /// is damaged.
    pub fn is_unrecognised(&self) -> bool {
        matches!(self, TbinError::Format { .. })
    }
}


pub type Result<T> = std::result::Result<T, TbinError>;
