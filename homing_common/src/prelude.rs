//! Prelude module for common re-exports.
//!
//! ```rust
//! use homing_common::prelude::*;
//! ```

// ─── Axes ───────────────────────────────────────────────────────────
pub use crate::axis::{Axis, AxisSet};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, HomingFileConfig, LogLevel, SharedConfig};
pub use crate::homing::{HomingAxes, HomingConfig};
pub use crate::settings::HomingSettings;

// ─── Hardware ───────────────────────────────────────────────────────
pub use crate::hal::bits::OutputBits;
pub use crate::hal::config::SimulationConfig;
pub use crate::hal::pins::PinMap;
pub use crate::hal::port::{Delay, MotionPlanner, StepPort, StepperDriver};

// ─── Machine State ──────────────────────────────────────────────────
pub use crate::position::MachinePosition;

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DEBOUNCE_SAMPLES, N_AXES};
