//! Hardware abstraction for the step/direction output port and the limit
//! switch input port.
//!
//! This module contains the port traits implemented by hardware and
//! simulation backends, the pin layout, the output bit pattern type and the
//! simulated machine configuration.

pub mod bits;
pub mod config;
pub mod pins;
pub mod port;
