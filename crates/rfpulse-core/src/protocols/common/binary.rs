/// Accumulate bits most significant first: the last bit is the LSB.
pub(crate) fn bin_to_dec_rev(bits: &[u8]) -> u32 {
    bits.iter()
        .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit & 1))
}

/// Spell `value` as exactly `width` bits, most significant first.
///
/// Bits above `width` are dropped; callers range-check first.
pub(crate) fn dec_to_bin_fixed(value: u32, width: usize) -> Vec<u8> {
    (0..width)
        .rev()
        .map(|shift| {
            if shift < u32::BITS as usize {
                ((value >> shift) & 1) as u8
            } else {
                0
            }
        })
        .collect()
}
