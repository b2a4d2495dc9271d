//! Homing Common Library
//!
//! Shared types for all homing workspace crates: the axis enumeration,
//! port abstractions, machine settings and TOML configuration loading.
//!
//! # Module Structure
//!
//! - [`axis`] - `Axis` enumeration and `AxisSet` bitflags
//! - [`hal`] - Port traits, pin layout and output bit patterns
//! - [`settings`] - Homing settings store (rates, resolution, invert masks)
//! - [`homing`] - Per-axis homing selection and cycle options
//! - [`position`] - Machine position vector
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use homing_common::prelude::*;
//!
//! let axes = AxisSet::X | AxisSet::Z;
//! assert!(axes.contains_axis(Axis::Z));
//! ```

pub mod axis;
pub mod config;
pub mod consts;
pub mod hal;
pub mod homing;
pub mod position;
pub mod prelude;
pub mod settings;
