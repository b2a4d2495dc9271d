//! Pin layout of the byte-wide step/direction output port and limit input port.
//!
//! `PinMap` maps each axis to a bit position; everything else in the
//! workspace talks about axes and derives masks from here.

use crate::axis::{Axis, AxisSet};
use crate::config::ConfigError;
use crate::consts::{N_AXES, PORT_WIDTH};
use serde::{Deserialize, Serialize};

/// Bit positions of every axis on the output and limit ports.
///
/// # TOML Example
///
/// ```toml
/// [pins]
/// step_bits = [0, 1, 2, 3]
/// direction_bits = [4, 5, 6, 7]
/// limit_bits = [0, 1, 2, 3]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinMap {
    /// Step output bit per axis (X, Y, Z, C).
    #[serde(default = "default_step_bits")]
    pub step_bits: [u8; N_AXES],
    /// Direction output bit per axis (X, Y, Z, C).
    #[serde(default = "default_direction_bits")]
    pub direction_bits: [u8; N_AXES],
    /// Limit input bit per axis (X, Y, Z, C).
    #[serde(default = "default_limit_bits")]
    pub limit_bits: [u8; N_AXES],
}

fn default_step_bits() -> [u8; N_AXES] {
    [0, 1, 2, 3]
}
fn default_direction_bits() -> [u8; N_AXES] {
    [4, 5, 6, 7]
}
fn default_limit_bits() -> [u8; N_AXES] {
    [0, 1, 2, 3]
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            step_bits: default_step_bits(),
            direction_bits: default_direction_bits(),
            limit_bits: default_limit_bits(),
        }
    }
}

impl PinMap {
    /// Step output mask of one axis.
    #[inline]
    pub const fn step_bit(&self, axis: Axis) -> u8 {
        1 << self.step_bits[axis.index()]
    }

    /// Direction output mask of one axis.
    #[inline]
    pub const fn direction_bit(&self, axis: Axis) -> u8 {
        1 << self.direction_bits[axis.index()]
    }

    /// Limit input mask of one axis.
    #[inline]
    pub const fn limit_bit(&self, axis: Axis) -> u8 {
        1 << self.limit_bits[axis.index()]
    }

    /// Step output bits of every axis in `axes`.
    pub fn step_mask_for(&self, axes: AxisSet) -> u8 {
        axes.axes().fold(0, |mask, axis| mask | self.step_bit(axis))
    }

    /// STEP_MASK: step output bits of all axes.
    pub fn step_mask(&self) -> u8 {
        self.step_mask_for(AxisSet::all())
    }

    /// DIRECTION_MASK: direction output bits of all axes.
    pub fn direction_mask(&self) -> u8 {
        Axis::ALL
            .iter()
            .fold(0, |mask, axis| mask | self.direction_bit(*axis))
    }

    /// LIMIT_MASK: limit input bits of all axes.
    pub fn limit_mask(&self) -> u8 {
        Axis::ALL
            .iter()
            .fold(0, |mask, axis| mask | self.limit_bit(*axis))
    }

    /// Validate the layout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - any bit position is outside the port width
    /// - two axes share a bit on the same port
    /// - a step bit coincides with a direction bit
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ports = [
            ("step_bits", &self.step_bits),
            ("direction_bits", &self.direction_bits),
            ("limit_bits", &self.limit_bits),
        ];

        for (name, bits) in ports {
            let mut seen = 0u8;
            for (axis, &bit) in Axis::ALL.iter().zip(bits.iter()) {
                if bit >= PORT_WIDTH {
                    return Err(ConfigError::ValidationError(format!(
                        "pins.{name}: bit {bit} for axis {axis} exceeds port width {PORT_WIDTH}"
                    )));
                }
                if seen & (1 << bit) != 0 {
                    return Err(ConfigError::ValidationError(format!(
                        "pins.{name}: bit {bit} assigned to more than one axis"
                    )));
                }
                seen |= 1 << bit;
            }
        }

        let overlap = self.step_mask() & self.direction_mask();
        if overlap != 0 {
            return Err(ConfigError::ValidationError(format!(
                "pins: step and direction bits overlap (mask {overlap:#010b})"
            )));
        }
        Ok(())
    }
}
