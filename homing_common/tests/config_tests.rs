//! Configuration file tests.
//!
//! Load complete homing files from disk and check section defaults, wiring
//! masks and semantic validation of every section.

use homing_common::axis::{Axis, AxisSet};
use homing_common::config::{ConfigError, ConfigLoader, HomingFileConfig, LogLevel};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"
[shared]
log_level = "debug"
service_name = "homing-bench-01"

[settings]
pulse_microseconds = 20
default_seek_rate = 600.0
default_feed_rate = 120.0
steps_per_mm = [250.0, 250.0, 400.0, 100.0]
invert_mask_stepdir = 0b0010_0001
invert_mask_limit = 0b0000_0100
limit_pullup = false

[homing]
home_x = true
home_y = false
home_z = true
home_c = true
max_pulses_per_phase = 100000

[pins]
step_bits = [3, 2, 1, 0]
direction_bits = [7, 6, 5, 4]
limit_bits = [4, 5, 6, 7]

[simulation]
switch_distance_steps = [100, 200, 300, 400]
switch_width_steps = 50
bounce_samples = 4
"#;

/// Write `content` as homing.toml into `dir`.
fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("homing.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn full_file_loads_every_section() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), FULL_CONFIG);

    let config = HomingFileConfig::load(&path).unwrap();
    config.validate().unwrap();

    assert_eq!(config.shared.log_level, LogLevel::Debug);
    assert_eq!(config.shared.service_name, "homing-bench-01");

    assert_eq!(config.settings.pulse_microseconds, 20);
    assert_eq!(config.settings.steps_per_mm(Axis::Z), 400.0);
    assert_eq!(config.settings.invert_mask_stepdir, 0x21);
    assert_eq!(config.settings.invert_mask_limit, 0x04);
    assert!(!config.settings.limit_pullup);

    assert_eq!(
        config.homing.axes.requested(),
        AxisSet::X | AxisSet::Z | AxisSet::C
    );
    assert_eq!(config.homing.axes.approach_z(), AxisSet::Z);
    assert_eq!(config.homing.axes.approach_xyc(), AxisSet::X | AxisSet::C);
    assert_eq!(config.homing.max_pulses_per_phase, Some(100_000));

    assert_eq!(config.pins.step_bit(Axis::X), 0b0000_1000);
    assert_eq!(config.pins.direction_mask(), 0xF0);
    assert_eq!(config.pins.limit_mask(), 0xF0);

    assert_eq!(config.simulation.switch_distance_steps, [100, 200, 300, 400]);
    assert_eq!(config.simulation.bounce_samples, 4);
}

#[test]
fn homing_section_defaults_to_xyz() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        r#"
[shared]
service_name = "homing"

[homing]
home_y = false
"#,
    );

    let config = HomingFileConfig::load(&path).unwrap();
    assert_eq!(config.homing.axes.requested(), AxisSet::X | AxisSet::Z);
    assert!(config.homing.max_pulses_per_phase.is_none());
}

#[test]
fn missing_shared_section_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "[settings]\npulse_microseconds = 10\n");

    assert!(matches!(
        HomingFileConfig::load(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn unknown_settings_field_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        r#"
[shared]
service_name = "homing"

[settings]
homing_pulloff = 1.0
"#,
    );

    assert!(matches!(
        HomingFileConfig::load(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn overlapping_step_and_direction_pins_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        r#"
[shared]
service_name = "homing"

[pins]
step_bits = [0, 1, 2, 3]
direction_bits = [3, 4, 5, 6]
"#,
    );

    let config = HomingFileConfig::load(&path).unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
    assert!(err.to_string().contains("overlap"));
}

#[test]
fn zero_pulse_budget_fails_validation() {
    let config = HomingFileConfig::from_toml(
        r#"
[shared]
service_name = "homing"

[homing]
max_pulses_per_phase = 0
"#,
    )
    .unwrap();

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn non_positive_rate_fails_validation() {
    let config = HomingFileConfig::from_toml(
        r#"
[shared]
service_name = "homing"

[settings]
default_feed_rate = 0.0
"#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("default_feed_rate"));
}

#[test]
fn shipped_sample_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../homing_cycle/config/homing.toml");
    let config = HomingFileConfig::load(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.shared.service_name, "homing-sim-01");
}
