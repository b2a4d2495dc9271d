//! Homing selection and cycle options.
//!
//! Defines `HomingAxes` (which axes take part in the homing cycle) and
//! `HomingConfig` (the `[homing]` configuration section).

use crate::axis::AxisSet;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Per-axis "home this axis" flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HomingAxes {
    #[serde(default = "default_home")]
    pub home_x: bool,
    #[serde(default = "default_home")]
    pub home_y: bool,
    #[serde(default = "default_home")]
    pub home_z: bool,
    #[serde(default)]
    pub home_c: bool,
}

fn default_home() -> bool {
    true
}

impl Default for HomingAxes {
    fn default() -> Self {
        Self {
            home_x: true,
            home_y: true,
            home_z: true,
            home_c: false,
        }
    }
}

impl HomingAxes {
    /// Every axis requested to home.
    pub fn requested(&self) -> AxisSet {
        AxisSet::from_flags(self.home_x, self.home_y, self.home_z, self.home_c)
    }

    /// Axes homed in the first approach phase (Z only).
    pub fn approach_z(&self) -> AxisSet {
        self.requested() & AxisSet::Z
    }

    /// Axes homed in the second approach phase (X, Y and C).
    pub fn approach_xyc(&self) -> AxisSet {
        self.requested() & (AxisSet::X | AxisSet::Y | AxisSet::C)
    }
}

/// `[homing]` configuration section.
///
/// # TOML Example
///
/// ```toml
/// [homing]
/// home_x = true
/// home_y = true
/// home_z = true
/// home_c = false
/// max_pulses_per_phase = 400000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomingConfig {
    /// Axis selection.
    #[serde(flatten)]
    pub axes: HomingAxes,
    /// Abort a phase after this many step pulses.
    ///
    /// `None` keeps the unbounded contract: a switch that never engages
    /// blocks the phase forever.
    #[serde(default)]
    pub max_pulses_per_phase: Option<u64>,
}

impl HomingConfig {
    /// Validate the section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `max_pulses_per_phase` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pulses_per_phase == Some(0) {
            return Err(ConfigError::ValidationError(
                "homing.max_pulses_per_phase must be > 0 when set".to_string(),
            ));
        }
        Ok(())
    }
}
