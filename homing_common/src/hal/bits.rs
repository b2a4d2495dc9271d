//! Output bit pattern for the step/direction port.

use std::fmt;

/// Bit pattern spanning the direction and step sub-masks of the output port.
///
/// Only XOR mutation is offered: clearing a bit with OR is impossible, and
/// reversing direction or retiring an axis needs 1 -> 0 transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OutputBits(u8);

impl OutputBits {
    #[inline]
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw byte value.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// XOR `mask` into the pattern.
    #[inline]
    pub fn toggle(&mut self, mask: u8) {
        self.0 ^= mask;
    }

    /// Pattern restricted to `mask`.
    #[inline]
    pub const fn masked(self, mask: u8) -> u8 {
        self.0 & mask
    }
}

impl fmt::Display for OutputBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        let mut bits = OutputBits::new(0b1010_0101);
        bits.toggle(0b0000_1111);
        assert_eq!(bits.bits(), 0b1010_1010);
        bits.toggle(0b0000_1111);
        assert_eq!(bits.bits(), 0b1010_0101);
    }

    #[test]
    fn masked_keeps_only_mask_bits() {
        let bits = OutputBits::new(0b1111_0011);
        assert_eq!(bits.masked(0x0F), 0b0000_0011);
        assert_eq!(bits.masked(0xF0), 0b1111_0000);
    }
}
