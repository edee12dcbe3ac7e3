//! Two 4-bit palette indices per byte, high nibble first.

/// Bytes needed to hold `count` nibbles.
pub const fn packed_len(count: usize) -> usize {
    count.div_ceil(2)
}

/// Pack a sequence of 4-bit values, appending to `out`.
///
/// Values are masked to 4 bits, so an out-of-range value never spills into
/// its neighbour. An odd trailing value is paired with `pad` in the low nibble.
pub fn pack_into(out: &mut Vec<u8>, values: impl IntoIterator<Item = u8>, pad: u8) {
    let mut values = values.into_iter();
    while let Some(high) = values.next() {
        let low = values.next().unwrap_or(pad);
        out.push((high & 0x0F) << 4 | (low & 0x0F));
    }
}

/// Pack a sequence of 4-bit values into a new buffer.
pub fn pack(values: &[u8], pad: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed_len(values.len()));
    pack_into(&mut out, values.iter().copied(), pad);
    out
}

/// Unpack bytes into their nibbles, high then low.
pub fn unpack(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes.iter().flat_map(|&b| [b >> 4, b & 0x0F])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_pairs() {
        assert_eq!(pack(&[1, 1, 0, 0], 0), vec![0x11, 0x00]);
        assert_eq!(pack(&[0xA, 0x5, 0xF, 0x0], 0), vec![0xA5, 0xF0]);
    }

    #[test]
    fn test_pack_odd_uses_pad() {
        assert_eq!(pack(&[3, 4, 5], 2), vec![0x34, 0x52]);
        assert_eq!(packed_len(3), 2);
        assert_eq!(packed_len(4), 2);
        assert_eq!(packed_len(0), 0);
    }

    #[test]
    fn test_pack_masks_overflow() {
        // 0x13 must not corrupt the low nibble.
        assert_eq!(pack(&[0x13, 0x4], 0), vec![0x34]);
    }

    #[test]
    fn test_unpack() {
        let values: Vec<u8> = unpack(&[0xA5, 0x0F]).collect();
        assert_eq!(values, vec![0xA, 0x5, 0x0, 0xF]);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let values: Vec<u8> = (0..64).map(|i| (i * 7 % 16) as u8).collect();
        let packed = pack(&values, 0);
        assert_eq!(packed.len(), 32);
        assert_eq!(unpack(&packed).collect::<Vec<_>>(), values);
    }
}
