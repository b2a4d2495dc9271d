//! Error types for the homing cycle.

use homing_common::axis::AxisSet;
use homing_common::config::ConfigError;
use thiserror::Error;

/// Errors raised by the homing engine and sequencer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HomingError {
    /// Settings rejected before any axis moved.
    #[error("Invalid homing configuration: {0}")]
    Config(#[from] ConfigError),

    /// Pulse budget of a phase exhausted with axes still active.
    #[error("Limit switch not found on axes {axes} after {pulses} pulses")]
    SwitchNotFound {
        /// Axes whose switch never debounced.
        axes: AxisSet,
        /// Pulses emitted in the phase.
        pulses: u64,
    },

    /// Real-time thread setup failed.
    #[error("RT setup error: {0}")]
    RtSetup(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_not_found_names_axes() {
        let err = HomingError::SwitchNotFound {
            axes: AxisSet::Y | AxisSet::C,
            pulses: 1200,
        };
        let msg = err.to_string();
        assert!(msg.contains("YC"));
        assert!(msg.contains("1200"));
    }

    #[test]
    fn config_error_converts() {
        let err: HomingError = ConfigError::ValidationError("bad rate".to_string()).into();
        assert!(matches!(err, HomingError::Config(_)));
        assert!(err.to_string().contains("bad rate"));
    }
}
