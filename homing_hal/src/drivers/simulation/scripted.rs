//! Scripted limit-signal port.
//!
//! Each axis gets a sequence of "switch pressed" samples; every call to
//! `read_limit_inputs` consumes one sample per axis. Once a script runs out
//! its last sample repeats (an empty script reads as never pressed).
//! Switches are wired active-low, as with pull-up inputs: a pressed switch
//! reads 0 before the wiring invert mask is applied.

use super::events::{EventLog, PortEvent};
use homing_common::axis::Axis;
use homing_common::consts::N_AXES;
use homing_common::hal::pins::PinMap;
use homing_common::hal::port::StepPort;

/// Port replaying per-axis switch scripts and recording every access.
#[derive(Debug)]
pub struct ScriptedPort {
    pins: PinMap,
    outputs: u8,
    step_invert: u8,
    limit_invert: u8,
    scripts: [Vec<bool>; N_AXES],
    reads: usize,
    pulses: [u64; N_AXES],
    pullups: u8,
    log: EventLog,
}

impl ScriptedPort {
    /// Port with no scripts, non-inverted wiring and all outputs low.
    pub fn new(pins: PinMap) -> Self {
        Self {
            pins,
            outputs: 0,
            step_invert: 0,
            limit_invert: 0,
            scripts: Default::default(),
            reads: 0,
            pulses: [0; N_AXES],
            pullups: 0,
            log: EventLog::new(),
        }
    }

    /// Step lines idle high for every bit in `mask` (inverted drivers).
    ///
    /// Outputs start at the idle level.
    pub fn with_step_invert(mut self, mask: u8) -> Self {
        let step_mask = self.pins.step_mask();
        self.step_invert = mask & step_mask;
        self.outputs = (self.outputs & !step_mask) | self.step_invert;
        self
    }

    /// Switch wiring inverted for every bit in `mask` (pressed reads 1).
    pub fn with_limit_invert(mut self, mask: u8) -> Self {
        self.limit_invert = mask;
        self
    }

    /// Record events into a shared `log`.
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    /// Script one axis: `samples[i]` is the switch state at read `i`.
    pub fn script(mut self, axis: Axis, samples: impl IntoIterator<Item = bool>) -> Self {
        self.scripts[axis.index()] = samples.into_iter().collect();
        self
    }

    /// Switch released for `released` reads, pressed from then on.
    pub fn engage_after(self, axis: Axis, released: usize) -> Self {
        let samples = std::iter::repeat_n(false, released).chain(std::iter::once(true));
        self.script(axis, samples)
    }

    /// Step pulses (idle -> active edges) seen on an axis.
    pub fn pulses(&self, axis: Axis) -> u64 {
        self.pulses[axis.index()]
    }

    /// Number of limit snapshots taken.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Current output latch.
    pub fn outputs(&self) -> u8 {
        self.outputs
    }

    /// Limit pins configured with pull-ups.
    pub fn pullups(&self) -> u8 {
        self.pullups
    }

    /// Event log handle.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    fn pressed(&self, axis: Axis, sample: usize) -> bool {
        let script = &self.scripts[axis.index()];
        match script.last() {
            None => false,
            Some(last) => *script.get(sample).unwrap_or(last),
        }
    }

    /// Replace the output bits in `mask`, counting rising step edges.
    fn latch(&mut self, mask: u8, bits: u8) {
        let before = self.outputs ^ self.step_invert;
        self.outputs = (self.outputs & !mask) | (bits & mask);
        self.count_edges(before);
    }

    fn count_edges(&mut self, before: u8) {
        let after = self.outputs ^ self.step_invert;
        for axis in Axis::ALL {
            let bit = self.pins.step_bit(axis);
            if before & bit == 0 && after & bit != 0 {
                self.pulses[axis.index()] += 1;
            }
        }
    }
}

impl StepPort for ScriptedPort {
    fn read_limit_inputs(&mut self) -> u8 {
        let sample = self.reads;
        self.reads += 1;

        // Unmapped input bits float high through the pull-ups.
        let mut raw = !self.pins.limit_mask();
        for axis in Axis::ALL {
            if !self.pressed(axis, sample) {
                raw |= self.pins.limit_bit(axis);
            }
        }
        raw ^= self.limit_invert;

        self.log.record(PortEvent::ReadLimits(raw));
        raw
    }

    fn write_direction_bits(&mut self, bits: u8) {
        let mask = self.pins.direction_mask();
        self.latch(mask, bits);
        self.log.record(PortEvent::WriteDirection(bits & mask));
    }

    fn write_step_bits(&mut self, bits: u8) {
        let mask = self.pins.step_mask();
        self.latch(mask, bits);
        self.log.record(PortEvent::WriteStep(bits & mask));
    }

    fn toggle_step_bits(&mut self, bits: u8) {
        let before = self.outputs ^ self.step_invert;
        self.outputs ^= bits;
        self.count_edges(before);
        self.log.record(PortEvent::ToggleStep(bits));
    }

    fn configure_limit_inputs(&mut self, mask: u8, pullup: bool) {
        if pullup {
            self.pullups |= mask;
        } else {
            self.pullups &= !mask;
        }
        self.log.record(PortEvent::ConfigureLimits { mask, pullup });
    }
}
