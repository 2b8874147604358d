//! Single-bit access within a byte.
//!
//! Positions count from the most significant bit: position 0 is `0b1000_0000`,
//! position 7 is `0b0000_0001`. This matches the way RFC 1035 numbers the
//! header flag bits, so the codec can address `QR` as bit 0 of the flags byte.

#[inline]
fn mask(pos: u8) -> u8 {
    debug_assert!(pos < 8, "bit position {pos} out of range");
    0b1000_0000 >> pos
}

/// Returns `true` if the bit at `pos` is set.
#[inline]
pub fn has_bit(byte: u8, pos: u8) -> bool {
    byte & mask(pos) != 0
}

#[inline]
pub fn set_bit(byte: u8, pos: u8) -> u8 {
    byte | mask(pos)
}

#[inline]
pub fn clear_bit(byte: u8, pos: u8) -> u8 {
    byte & !mask(pos)
}

/// Forces the bit at `pos` to `value`, leaving every other bit untouched.
#[inline]
pub fn set_bit_to(byte: u8, pos: u8, value: bool) -> u8 {
    if value {
        set_bit(byte, pos)
    } else {
        clear_bit(byte, pos)
    }
}
