//! Fixed 10-byte TBIN header and section layout.

use serde::Serialize;

use crate::error::{Result, TbinError};

use super::nibble::packed_len;
use super::palette_table::PALETTE_BLOCK_LEN;

/// File signature.
pub const MAGIC: [u8; 4] = [0xCA, 0xFE, 0xF0, 0x0D];

/// The only format version this crate reads and writes.
pub const VERSION: u8 = 0;

/// Header size in bytes.
pub const HEADER_LEN: usize = 10;

/// Largest value a count byte can hold.
pub const MAX_COUNT: usize = u8::MAX as usize;

/// Size of one remap entry.
pub const REMAP_ENTRY_LEN: usize = 2;

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    pub version: u8,
    pub columns: usize,
    pub rows: usize,
    pub tile_width: usize,
    pub tile_height: usize,
    pub palette_count: u8,
    pub remap_count: u8,
    pub tile_count: u8,
}

/// Byte offsets of each section, derived from the header counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub palette_offset: usize,
    pub remap_offset: usize,
    pub tile_offset: usize,
    pub tile_record_len: usize,
    pub end: usize,
}

impl Header {
    /// Bytes per stored tile: one header byte plus the packed pixels.
    pub fn tile_record_len(&self) -> usize {
        1 + packed_len(self.tile_width * self.tile_height)
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    pub fn layout(&self) -> Layout {
        let palette_offset = HEADER_LEN;
        let remap_offset = palette_offset + self.palette_count as usize * PALETTE_BLOCK_LEN;
        let tile_offset = remap_offset + self.remap_count as usize * REMAP_ENTRY_LEN;
        let tile_record_len = self.tile_record_len();
        Layout {
            palette_offset,
            remap_offset,
            tile_offset,
            tile_record_len,
            end: tile_offset + self.tile_count as usize * tile_record_len,
        }
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.push(self.version);
        out.push(pack_dims(self.columns, self.rows));
        out.push(pack_dims(self.tile_width, self.tile_height));
        out.push(self.palette_count);
        out.push(self.remap_count);
        out.push(self.tile_count);
    }

    /// Parse and check the header at the start of `bytes`.
    ///
    /// A wrong signature or version is a format error; a correct signature
    /// followed by too few bytes is a truncation error.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
            return Err(TbinError::Format {
                message: "missing CA FE F0 0D signature".to_string(),
                help: Some("The data is not a TBIN sprite sheet".to_string()),
            });
        }
        if bytes.len() < HEADER_LEN {
            return Err(TbinError::Truncated {
                section: "header",
                needed: HEADER_LEN,
                available: bytes.len(),
            });
        }

        let version = bytes[4];
        if version != VERSION {
            return Err(TbinError::Format {
                message: format!("unsupported version {}", version),
                help: Some(format!("This build reads version {} only", VERSION)),
            });
        }

        let (columns, rows) = unpack_dims(bytes[5]);
        let (tile_width, tile_height) = unpack_dims(bytes[6]);

        Ok(Self {
            version,
            columns,
            rows,
            tile_width,
            tile_height,
            palette_count: bytes[7],
            remap_count: bytes[8],
            tile_count: bytes[9],
        })
    }
}

/// Pack two 1..=16 dimensions into one byte, each stored minus one.
pub fn pack_dims(high: usize, low: usize) -> u8 {
    ((high.saturating_sub(1) & 0x0F) << 4 | (low.saturating_sub(1) & 0x0F)) as u8
}

/// Inverse of [`pack_dims`]. Always yields values in 1..=16.
pub fn unpack_dims(byte: u8) -> (usize, usize) {
    ((byte >> 4) as usize + 1, (byte & 0x0F) as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Header {
        Header {
            version: VERSION,
            columns: 2,
            rows: 3,
            tile_width: 8,
            tile_height: 16,
            palette_count: 2,
            remap_count: 1,
            tile_count: 4,
        }
    }

    #[test]
    fn test_dims_nibbles() {
        assert_eq!(pack_dims(1, 1), 0x00);
        assert_eq!(pack_dims(16, 16), 0xFF);
        assert_eq!(pack_dims(2, 3), 0x12);
        assert_eq!(unpack_dims(0x12), (2, 3));
        assert_eq!(unpack_dims(0xF0), (16, 1));
    }

    #[test]
    fn test_write_bytes() {
        let mut out = Vec::new();
        header().write(&mut out);
        assert_eq!(
            out,
            vec![0xCA, 0xFE, 0xF0, 0x0D, 0x00, 0x12, 0x7F, 0x02, 0x01, 0x04]
        );
    }

    #[test]
    fn test_parse_inverts_write() {
        let mut out = Vec::new();
        header().write(&mut out);
        assert_eq!(Header::parse(&out).unwrap(), header());
    }

    #[test]
    fn test_parse_bad_magic() {
        let err = Header::parse(&[0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 0, 0, 0]).unwrap_err();
        assert!(err.is_unrecognised());
        assert!(Header::parse(&[0xCA]).unwrap_err().is_unrecognised());
        assert!(Header::parse(&[]).unwrap_err().is_unrecognised());
    }

    #[test]
    fn test_parse_bad_version() {
        let bytes = [0xCA, 0xFE, 0xF0, 0x0D, 0x01, 0, 0, 0, 0, 0];
        let err = Header::parse(&bytes).unwrap_err();
        assert!(matches!(err, TbinError::Format { ref message, .. } if message.contains("version 1")));
    }

    #[test]
    fn test_parse_short_header() {
        let bytes = [0xCA, 0xFE, 0xF0, 0x0D, 0x00, 0x11];
        assert!(matches!(
            Header::parse(&bytes),
            Err(TbinError::Truncated { section: "header", needed: 10, available: 6 })
        ));
    }

    #[test]
    fn test_layout() {
        let layout = header().layout();
        assert_eq!(layout.palette_offset, 10);
        assert_eq!(layout.remap_offset, 10 + 64);
        assert_eq!(layout.tile_offset, 10 + 64 + 2);
        assert_eq!(layout.tile_record_len, 1 + 64);
        assert_eq!(layout.end, 10 + 64 + 2 + 4 * 65);
    }

    #[test]
    fn test_odd_tile_record_rounds_up() {
        let h = Header {
            tile_width: 3,
            tile_height: 3,
            ..header()
        };
        assert_eq!(h.tile_record_len(), 1 + 5);
    }
}
