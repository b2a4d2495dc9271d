//! # Homing Cycle Library
//!
//! Drives the limit-switch homing cycle of a step/direction machine: axes
//! approach their switches at the seek rate, each axis stops on its own once
//! its switch is debounced, all axes back off the switches at the feed rate
//! and the resulting location becomes machine zero.
//!
//! ## Components
//!
//! | Module        | Role                                                   |
//! |---------------|--------------------------------------------------------|
//! | [`feedrate`]  | Feed rate [mm/min] -> step period [µs]                 |
//! | [`direction`] | Initial direction/step output pattern                  |
//! | [`debounce`]  | Consecutive-sample switch filter                       |
//! | [`engine`]    | Busy-wait multi-axis pulse loop                        |
//! | [`sequencer`] | Full procedure: sync, enable, approach, leave, zero    |
//! | [`limits`]    | Limit input initialisation                             |
//! | [`rt`]        | Real-time thread setup (`rt` feature)                  |
//!
//! ## Blocking Contract
//!
//! Every phase blocks until all of its axes have debounced their switch.
//! Without `max_pulses_per_phase` a switch that never engages blocks the
//! caller forever; this is the documented default, not a fault.

pub mod debounce;
pub mod direction;
pub mod engine;
pub mod error;
pub mod feedrate;
pub mod limits;
pub mod rt;
pub mod sequencer;

pub use crate::engine::{CycleReport, HomingCycleEngine};
pub use crate::error::HomingError;
pub use crate::sequencer::{HomingPhase, HomingReport, HomingSequencer};
