//! Port backends.
//!
//! - [`simulation`] - Simulated machine, scripted port and virtual clock
//! - [`spin`] - Busy-wait delay for real-time operation

pub mod simulation;
pub mod spin;
