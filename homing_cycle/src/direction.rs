//! Initial output pattern for a homing phase.

use homing_common::axis::AxisSet;
use homing_common::hal::bits::OutputBits;
use homing_common::hal::pins::PinMap;

/// Computes the direction and step bits a homing phase starts from.
#[derive(Debug, Clone, Copy)]
pub struct DirectionResolver<'a> {
    pins: &'a PinMap,
    invert_mask: u8,
}

impl<'a> DirectionResolver<'a> {
    /// `invert_mask` is the global step/direction invert mask.
    pub fn new(pins: &'a PinMap, invert_mask: u8) -> Self {
        Self { pins, invert_mask }
    }

    /// Output pattern for moving `axes`, toward the switches unless `reverse`.
    ///
    /// All direction bits start high (toward the switches) with one step bit
    /// per moving axis; `reverse` flips the direction bits only and the invert
    /// mask is applied last, to both sub-masks.
    pub fn resolve(&self, axes: AxisSet, reverse: bool) -> OutputBits {
        let direction_mask = self.pins.direction_mask();
        let mut bits = OutputBits::new(direction_mask | self.pins.step_mask_for(axes));
        if reverse {
            bits.toggle(direction_mask);
        }
        bits.toggle(self.invert_mask);
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homing_common::axis::Axis;

    #[test]
    fn forward_sets_every_direction_bit() {
        let pins = PinMap::default();
        let bits = DirectionResolver::new(&pins, 0).resolve(AxisSet::X, false);
        assert_eq!(bits.masked(pins.direction_mask()), pins.direction_mask());
        assert_eq!(bits.masked(pins.step_mask()), pins.step_bit(Axis::X));
    }

    #[test]
    fn reverse_clears_every_direction_bit() {
        let pins = PinMap::default();
        let bits = DirectionResolver::new(&pins, 0).resolve(AxisSet::X, true);
        assert_eq!(bits.masked(pins.direction_mask()), 0);
        // Step bits are not affected by reversing.
        assert_eq!(bits.masked(pins.step_mask()), pins.step_bit(Axis::X));
    }

    #[test]
    fn invert_mask_applies_to_both_sub_masks() {
        let pins = PinMap::default();
        let invert = pins.direction_bit(Axis::Y) | pins.step_bit(Axis::Y);
        let bits = DirectionResolver::new(&pins, invert).resolve(AxisSet::X | AxisSet::Y, false);

        assert_eq!(
            bits.masked(pins.direction_mask()),
            pins.direction_mask() & !pins.direction_bit(Axis::Y)
        );
        assert_eq!(bits.masked(pins.step_mask()), pins.step_bit(Axis::X));
    }

    #[test]
    fn inverted_idle_axis_keeps_step_line_high() {
        let pins = PinMap::default();
        let invert = pins.step_bit(Axis::C);
        let bits = DirectionResolver::new(&pins, invert).resolve(AxisSet::Z, true);
        assert_eq!(
            bits.masked(pins.step_mask()),
            pins.step_bit(Axis::Z) | pins.step_bit(Axis::C)
        );
        assert_eq!(bits.masked(pins.direction_mask()), 0);
    }
}
