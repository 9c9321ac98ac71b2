//! Bit-width arithmetic for selector signals and their binary encodings.

/// Returns the number of bits in the unsigned binary representation of `n`.
///
/// `bit_length(0)` is 0, `bit_length(2)` is 2, `bit_length(4)` is 3.
pub fn bit_length(n: u32) -> u32 {
    u32::BITS - n.leading_zeros()
}

/// Returns the number of bits needed to encode every index in `0..count`.
///
/// Never returns less than 1 so that a selector always has a signal.
pub fn minimal_selector_width(count: u32) -> u32 {
    bit_length(count.saturating_sub(1)).max(1)
}

/// Renders `value` as a zero-padded binary VHDL literal of `width` bits.
///
/// Width 1 yields a character literal (`'1'`), wider values a bit-string
/// literal (`"01"`). Bits of `value` above `width` are discarded.
pub fn binary_literal(value: u32, width: u32) -> String {
    let width = width.max(1);
    let bits: String = (0..width)
        .rev()
        .map(|bit| {
            if bit < u32::BITS && (value >> bit) & 1 == 1 {
                '1'
            } else {
                '0'
            }
        })
        .collect();
    if width == 1 {
        format!("'{bits}'")
    } else {
        format!("\"{bits}\"")
    }
}
