//! Fixed-width palette blocks: 16 big-endian RGB565 colours, 32 bytes.

use crate::types::{Colour, Palette, PALETTE_SIZE};

/// Size of one serialized palette.
pub const PALETTE_BLOCK_LEN: usize = PALETTE_SIZE * 2;

/// Serialize a palette. Unused slots are written as zero (black).
pub fn encode_palette(palette: &Palette) -> [u8; PALETTE_BLOCK_LEN] {
    let mut block = [0u8; PALETTE_BLOCK_LEN];
    for (slot, colour) in palette.colours().iter().take(PALETTE_SIZE).enumerate() {
        block[slot * 2..slot * 2 + 2].copy_from_slice(&colour.to_rgb565().to_be_bytes());
    }
    block
}

/// Deserialize a palette block. Always yields exactly 16 colours.
pub fn decode_palette(name: impl Into<String>, block: &[u8; PALETTE_BLOCK_LEN]) -> Palette {
    let mut slots = [Colour::BLACK; PALETTE_SIZE];
    for (slot, pair) in slots.iter_mut().zip(block.chunks_exact(2)) {
        *slot = Colour::from_rgb565(u16::from_be_bytes([pair[0], pair[1]]));
    }
    Palette::from_slots(name, slots)
}
