//! Simulated machine configuration.
//!
//! Describes where each simulated limit switch sits relative to the start
//! position and how noisy its contacts are. Consumed by the simulation
//! port in `homing_hal`.

use crate::config::ConfigError;
use crate::consts::N_AXES;
use serde::{Deserialize, Serialize};

/// `[simulation]` configuration section.
///
/// # TOML Example
///
/// ```toml
/// [simulation]
/// switch_distance_steps = [4000, 3000, 1500, 0]
/// switch_width_steps = 200
/// bounce_samples = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Steps in the approach direction from the start position to the
    /// point where each switch engages (X, Y, Z, C).
    #[serde(default = "default_switch_distance")]
    pub switch_distance_steps: [u32; N_AXES],
    /// Travel past the engage point over which a switch stays engaged.
    #[serde(default = "default_switch_width")]
    pub switch_width_steps: u32,
    /// Samples of alternating contact noise when a switch changes state.
    #[serde(default)]
    pub bounce_samples: u32,
}

fn default_switch_distance() -> [u32; N_AXES] {
    [4000, 3000, 1500, 800]
}
fn default_switch_width() -> u32 {
    200
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            switch_distance_steps: default_switch_distance(),
            switch_width_steps: default_switch_width(),
            bounce_samples: 0,
        }
    }
}

impl SimulationConfig {
    /// Validate the section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the switch width is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.switch_width_steps == 0 {
            return Err(ConfigError::ValidationError(
                "simulation.switch_width_steps must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_width_rejected() {
        let cfg = SimulationConfig {
            switch_width_steps: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
