//! Port and collaborator traits used by the homing cycle.
//!
//! This module defines:
//! - `StepPort` trait - Byte-wide step/direction outputs and limit inputs
//! - `Delay` trait - Blocking microsecond delay
//! - `MotionPlanner` trait - Motion queue synchronization
//! - `StepperDriver` trait - Stepper driver power control

/// Byte-wide step/direction output port plus limit switch input port.
///
/// Implementations are constructed with a `PinMap` and own the knowledge of
/// which output bits form the direction and step sub-masks.
///
/// # Ownership
///
/// The homing cycle assumes exclusive access for its whole duration;
/// nothing else may drive the outputs while a cycle runs.
pub trait StepPort {
    /// Snapshot of the raw limit input byte (one bit per axis).
    fn read_limit_inputs(&mut self) -> u8;

    /// Replace the direction sub-mask bits of the output port with the
    /// corresponding bits of `bits`. Step bits are left unchanged.
    fn write_direction_bits(&mut self, bits: u8);

    /// Replace the step sub-mask bits of the output port with the
    /// corresponding bits of `bits`. Direction bits are left unchanged.
    fn write_step_bits(&mut self, bits: u8);

    /// Invert every output bit set in `bits`.
    fn toggle_step_bits(&mut self, bits: u8);

    /// Configure the limit pins in `mask` as inputs, optionally with pull-ups.
    ///
    /// Default implementation does nothing (for ports with fixed input wiring).
    fn configure_limit_inputs(&mut self, _mask: u8, _pullup: bool) {
        // Default: no-op
    }
}

/// Blocking delay used for pulse timing.
///
/// Production implementations block the calling thread; test
/// implementations advance a virtual clock instantly.
pub trait Delay {
    /// Block for `us` microseconds.
    fn delay_us(&mut self, us: u32);
}

/// Motion planner collaborator.
pub trait MotionPlanner {
    /// Block until the motion queue is empty.
    fn synchronize(&mut self);
}

/// Stepper driver power collaborator.
pub trait StepperDriver {
    /// Power the motor driver outputs.
    fn enable(&mut self);
}

impl<T: StepPort + ?Sized> StepPort for &mut T {
    fn read_limit_inputs(&mut self) -> u8 {
        (**self).read_limit_inputs()
    }

    fn write_direction_bits(&mut self, bits: u8) {
        (**self).write_direction_bits(bits)
    }

    fn write_step_bits(&mut self, bits: u8) {
        (**self).write_step_bits(bits)
    }

    fn toggle_step_bits(&mut self, bits: u8) {
        (**self).toggle_step_bits(bits)
    }

    fn configure_limit_inputs(&mut self, mask: u8, pullup: bool) {
        (**self).configure_limit_inputs(mask, pullup)
    }
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}
