//! TBIN binary sprite sheet codec.
//!
//! ```text
//! offset 0   magic          CA FE F0 0D
//! offset 4   version        00
//! offset 5   grid dims      (cols-1) << 4 | (rows-1)
//! offset 6   tile dims      (tileW-1) << 4 | (tileH-1)
//! offset 7   palette count
//! offset 8   remap count
//! offset 9   tile count
//! offset 10  palette blocks, 32 bytes each (16 big-endian RGB565 colours)
//!            remap entries, 2 bytes each (logical, physical)
//!            tile records, 1 header byte + ceil(tileW*tileH/2) pixel bytes
//! ```

mod header;
mod inspect;
pub mod nibble;
mod palette_table;
mod reader;
pub mod rgb565;
mod scan;
mod writer;

pub use header::{pack_dims, unpack_dims, Header, Layout, HEADER_LEN, MAGIC, MAX_COUNT, VERSION};
pub use inspect::{inspect, TbinInfo};
pub use palette_table::{decode_palette, encode_palette, PALETTE_BLOCK_LEN};
pub use reader::{decode, read_tbin, StoredTile};
pub use scan::{scan, split_tile_header, tile_header, RemapEntry, SparseTiles, TileRecord};
pub use writer::{encode, write_tbin};
