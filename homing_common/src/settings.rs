//! Machine settings consulted by the homing cycle.
//!
//! Owned by the settings store; the homing cycle only reads them.

use crate::axis::Axis;
use crate::config::ConfigError;
use crate::consts::N_AXES;
use serde::{Deserialize, Serialize};

/// Settings store subset used while homing.
///
/// # TOML Example
///
/// ```toml
/// [settings]
/// pulse_microseconds = 30
/// default_seek_rate = 500.0
/// default_feed_rate = 250.0
/// steps_per_mm = [200.0, 200.0, 200.0, 200.0]
/// invert_mask_stepdir = 0
/// invert_mask_limit = 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HomingSettings {
    /// Step pulse width [µs].
    #[serde(default = "default_pulse_microseconds")]
    pub pulse_microseconds: u32,
    /// Approach rate [mm/min].
    #[serde(default = "default_seek_rate")]
    pub default_seek_rate: f64,
    /// Leave rate [mm/min].
    #[serde(default = "default_feed_rate")]
    pub default_feed_rate: f64,
    /// Resolution per axis [steps/mm] (X, Y, Z, C).
    #[serde(default = "default_steps_per_mm")]
    pub steps_per_mm: [f64; N_AXES],
    /// XOR mask applied to the step/direction output pattern.
    #[serde(default)]
    pub invert_mask_stepdir: u8,
    /// XOR mask applied to the limit input snapshot.
    #[serde(default)]
    pub invert_mask_limit: u8,
    /// Enable pull-ups on the limit inputs.
    #[serde(default = "default_limit_pullup")]
    pub limit_pullup: bool,
}

fn default_pulse_microseconds() -> u32 {
    30
}
fn default_seek_rate() -> f64 {
    500.0
}
fn default_feed_rate() -> f64 {
    250.0
}
fn default_steps_per_mm() -> [f64; N_AXES] {
    [200.0; N_AXES]
}
fn default_limit_pullup() -> bool {
    true
}

impl Default for HomingSettings {
    fn default() -> Self {
        Self {
            pulse_microseconds: default_pulse_microseconds(),
            default_seek_rate: default_seek_rate(),
            default_feed_rate: default_feed_rate(),
            steps_per_mm: default_steps_per_mm(),
            invert_mask_stepdir: 0,
            invert_mask_limit: 0,
            limit_pullup: default_limit_pullup(),
        }
    }
}

impl HomingSettings {
    /// Resolution of one axis [steps/mm].
    #[inline]
    pub fn steps_per_mm(&self, axis: Axis) -> f64 {
        self.steps_per_mm[axis.index()]
    }

    /// Validate values that do not depend on the derived pulse period.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `pulse_microseconds` is zero
    /// - any rate is not a positive finite number
    /// - any axis resolution is not a positive finite number
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pulse_microseconds == 0 {
            return Err(ConfigError::ValidationError(
                "settings.pulse_microseconds must be > 0".to_string(),
            ));
        }
        for (name, rate) in [
            ("default_seek_rate", self.default_seek_rate),
            ("default_feed_rate", self.default_feed_rate),
        ] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "settings.{name} must be a positive rate, got {rate}"
                )));
            }
        }
        for axis in Axis::ALL {
            let steps = self.steps_per_mm(axis);
            if !(steps.is_finite() && steps > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "settings.steps_per_mm[{axis}] must be positive, got {steps}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = HomingSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.steps_per_mm(Axis::X), 200.0);
    }

    #[test]
    fn zero_feed_rate_rejected() {
        let settings = HomingSettings {
            default_feed_rate: 0.0,
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("default_feed_rate"));
    }

    #[test]
    fn nan_seek_rate_rejected() {
        let settings = HomingSettings {
            default_seek_rate: f64::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn negative_resolution_rejected() {
        let mut settings = HomingSettings::default();
        settings.steps_per_mm[Axis::C.index()] = -1.0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("steps_per_mm[C]"));
    }

    #[test]
    fn zero_pulse_width_rejected() {
        let settings = HomingSettings {
            pulse_microseconds: 0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
