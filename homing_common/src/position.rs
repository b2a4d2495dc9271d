//! Machine position vector.

use crate::axis::{Axis, AxisSet};
use crate::consts::N_AXES;

/// Absolute machine position per axis [steps].
///
/// Written only by the homing sequencer once every homing phase has
/// completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MachinePosition([i32; N_AXES]);

impl MachinePosition {
    #[inline]
    pub const fn new(steps: [i32; N_AXES]) -> Self {
        Self(steps)
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> i32 {
        self.0[axis.index()]
    }

    #[inline]
    pub fn set(&mut self, axis: Axis, steps: i32) {
        self.0[axis.index()] = steps;
    }

    /// Declare the current location of every axis in `axes` as origin.
    pub fn zero(&mut self, axes: AxisSet) {
        for axis in axes.axes() {
            self.0[axis.index()] = 0;
        }
    }

    #[inline]
    pub fn as_array(&self) -> [i32; N_AXES] {
        self.0
    }
}
