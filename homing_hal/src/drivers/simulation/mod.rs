//! Simulation backends.
//!
//! - [`machine`] - `SimulatedMachine`: axes travel over limit switches
//! - [`scripted`] - `ScriptedPort`: per-sample scripted limit signals
//! - [`clock`] - `VirtualClock`: instant delays with elapsed time accounting
//! - [`events`] - Shared event log and simulated planner/stepper collaborators

pub mod clock;
pub mod events;
pub mod machine;
pub mod scripted;

pub use clock::VirtualClock;
pub use events::{EventLog, PortEvent, SimPlanner, SimSteppers};
pub use machine::SimulatedMachine;
pub use scripted::ScriptedPort;
