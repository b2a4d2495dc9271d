//! Feed rate to step period conversion.
//!
//! One reference axis resolution is used for every phase, whichever axes
//! are moving. Usually all axes share a resolution; when they do not, X and
//! Y match and Z is finer, so X is the slowest-stepping axis and the safe
//! choice. Callers with other machines must make sure X is the limiting
//! axis.

use homing_common::axis::Axis;
use homing_common::config::ConfigError;
use homing_common::consts::MICROS_PER_MINUTE;
use homing_common::settings::HomingSettings;

/// Axis whose resolution defines the pulse period.
pub const REFERENCE_AXIS: Axis = Axis::X;

/// Step period [µs] for `feed_rate` [mm/min] at `steps_per_mm`.
///
/// Unchecked: a zero rate or resolution yields an infinite period.
#[inline]
pub fn feed_rate_to_period_us(feed_rate: f64, steps_per_mm: f64) -> f64 {
    MICROS_PER_MINUTE / (feed_rate * steps_per_mm)
}

/// Converts configured rates to validated pulse periods.
#[derive(Debug, Clone, Copy)]
pub struct FeedRateConverter<'a> {
    settings: &'a HomingSettings,
}

impl<'a> FeedRateConverter<'a> {
    pub fn new(settings: &'a HomingSettings) -> Self {
        Self { settings }
    }

    /// Unchecked period for `feed_rate` using the reference axis.
    pub fn period_us(&self, feed_rate: f64) -> f64 {
        feed_rate_to_period_us(feed_rate, self.settings.steps_per_mm(REFERENCE_AXIS))
    }

    /// Period rounded to whole microseconds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `feed_rate` or the reference resolution is not positive and finite
    /// - the period does not fit in `u32`
    /// - the period is not longer than the step pulse width
    pub fn checked_period_us(&self, feed_rate: f64) -> Result<u32, ConfigError> {
        let steps = self.settings.steps_per_mm(REFERENCE_AXIS);
        if !(feed_rate.is_finite() && feed_rate > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "feed rate must be positive, got {feed_rate} mm/min"
            )));
        }
        if !(steps.is_finite() && steps > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "steps_per_mm[{REFERENCE_AXIS}] must be positive, got {steps}"
            )));
        }

        let period = self.period_us(feed_rate).round();
        if period > f64::from(u32::MAX) {
            return Err(ConfigError::ValidationError(format!(
                "{feed_rate} mm/min gives a step period of {period} µs, too long"
            )));
        }
        let period = period as u32;
        let pulse = self.settings.pulse_microseconds;
        if period <= pulse {
            return Err(ConfigError::ValidationError(format!(
                "{feed_rate} mm/min gives a step period of {period} µs, \
                 not longer than the {pulse} µs step pulse"
            )));
        }
        Ok(period)
    }

    /// Approach period from `default_seek_rate`.
    pub fn seek_period_us(&self) -> Result<u32, ConfigError> {
        self.checked_period_us(self.settings.default_seek_rate)
    }

    /// Leave period from `default_feed_rate`.
    pub fn feed_period_us(&self) -> Result<u32, ConfigError> {
        self.checked_period_us(self.settings.default_feed_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_for_500_mm_min_at_200_steps() {
        let period = feed_rate_to_period_us(500.0, 200.0);
        assert!((period - 600.0).abs() < 1e-9);

        let settings = HomingSettings::default();
        let converter = FeedRateConverter::new(&settings);
        assert_eq!(converter.checked_period_us(500.0), Ok(600));
    }

    #[test]
    fn zero_rate_is_infinite_unchecked() {
        assert!(feed_rate_to_period_us(0.0, 200.0).is_infinite());
    }

    #[test]
    fn zero_rate_rejected_checked() {
        let settings = HomingSettings::default();
        let converter = FeedRateConverter::new(&settings);
        assert!(matches!(
            converter.checked_period_us(0.0),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(converter.checked_period_us(-10.0).is_err());
        assert!(converter.checked_period_us(f64::INFINITY).is_err());
    }

    #[test]
    fn uses_reference_axis_only() {
        let mut settings = HomingSettings::default();
        settings.steps_per_mm = [100.0, 400.0, 800.0, 50.0];
        let converter = FeedRateConverter::new(&settings);
        // 60e6 / (1000 * 100)
        assert_eq!(converter.checked_period_us(1000.0), Ok(600));
    }

    #[test]
    fn period_not_longer_than_pulse_rejected() {
        let settings = HomingSettings {
            pulse_microseconds: 600,
            ..Default::default()
        };
        let converter = FeedRateConverter::new(&settings);
        let err = converter.checked_period_us(500.0).unwrap_err();
        assert!(err.to_string().contains("step pulse"));
        assert_eq!(converter.checked_period_us(400.0), Ok(750));
    }

    #[test]
    fn rates_from_settings() {
        let settings = HomingSettings {
            default_seek_rate: 500.0,
            default_feed_rate: 250.0,
            ..Default::default()
        };
        let converter = FeedRateConverter::new(&settings);
        assert_eq!(converter.seek_period_us(), Ok(600));
        assert_eq!(converter.feed_period_us(), Ok(1200));
    }

    #[test]
    fn tiny_rate_overflows_u32() {
        let settings = HomingSettings::default();
        let converter = FeedRateConverter::new(&settings);
        assert!(converter.checked_period_us(1e-9).is_err());
    }
}
