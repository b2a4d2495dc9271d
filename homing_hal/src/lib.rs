//! # Homing HAL Library
//!
//! Port backends for the homing cycle. Every backend implements the traits
//! defined in `homing_common::hal::port`.
//!
//! # Module Structure
//!
//! - [`drivers`] - Port, delay and collaborator implementations
//!
//! # Backends
//!
//! | Backend            | Purpose                                            |
//! |--------------------|----------------------------------------------------|
//! | `SimulatedMachine` | Axis travel with limit switches at fixed positions |
//! | `ScriptedPort`     | Per-sample scripted limit signals, full event log  |
//! | `VirtualClock`     | Delay that advances a counter instantly            |
//! | `SpinDelay`        | Busy-wait delay on the calling thread              |

#![warn(missing_docs)]

pub mod drivers;

// Re-export key types for convenience
pub use crate::drivers::simulation::{
    EventLog, PortEvent, ScriptedPort, SimPlanner, SimSteppers, SimulatedMachine, VirtualClock,
};
pub use crate::drivers::spin::SpinDelay;
