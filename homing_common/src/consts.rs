//! System-wide constants for the homing workspace.
//!
//! Single source of truth for numeric limits shared by all crates.

use static_assertions::const_assert;

/// Number of axes the machine drives (X, Y, Z, C).
pub const N_AXES: usize = 4;

/// Width of the step/direction output port and of the limit input port [bits].
pub const PORT_WIDTH: u8 = 8;

/// Consecutive engaged samples required before a limit switch is accepted.
pub const DEBOUNCE_SAMPLES: u8 = 10;

/// Microseconds per minute, used by the feed-rate to period conversion.
pub const MICROS_PER_MINUTE: f64 = 60.0 * 1_000_000.0;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/homing/homing.toml";

// Every axis needs a step and a direction line on the same byte-wide port.
const_assert!(N_AXES * 2 <= PORT_WIDTH as usize);
const_assert!(DEBOUNCE_SAMPLES > 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert_eq!(N_AXES, 4);
        assert_eq!(DEBOUNCE_SAMPLES, 10);
        assert_eq!(MICROS_PER_MINUTE, 60_000_000.0);
    }
}
