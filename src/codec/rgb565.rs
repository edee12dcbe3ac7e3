//! 24-bit RGB <-> 16-bit RGB565 conversion.

/// Quantize a `0xRRGGBB` value to RGB565 (red high, blue low).
///
/// Keeps the top 5/6/5 bits of each channel. Bits above 24 are ignored.
pub const fn to_rgb565(rgb: u32) -> u16 {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;
    ((r >> 3) << 11 | (g >> 2) << 5 | (b >> 3)) as u16
}

/// Expand an RGB565 value to `0xRRGGBB`.
///
/// Each field is shifted back into the top of its byte; the low bits stay zero.
pub const fn from_rgb565(value: u16) -> u32 {
    let value = value as u32;
    let r = (value >> 11) & 0x1F;
    let g = (value >> 5) & 0x3F;
    let b = value & 0x1F;
    (r << 3) << 16 | (g << 2) << 8 | (b << 3)
}
