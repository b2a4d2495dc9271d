//! Simulated machine with one limit switch per axis.
//!
//! Each axis carriage starts at position 0 and moves one step per active
//! step edge, toward its switch when its logical direction line is high and
//! away from it otherwise. A switch is pressed while the carriage sits in
//! `[distance, distance + width)` and can chatter for a configurable number
//! of samples whenever it changes state.

use homing_common::axis::Axis;
use homing_common::consts::N_AXES;
use homing_common::hal::config::SimulationConfig;
use homing_common::hal::pins::PinMap;
use homing_common::hal::port::StepPort;
use homing_common::settings::HomingSettings;
use tracing::{debug, trace};

/// State of one simulated axis.
#[derive(Debug, Clone, Copy, Default)]
struct SimAxis {
    /// Carriage position [steps], positive toward the switch.
    position: i64,
    /// Position where the switch starts to be pressed.
    engage_at: i64,
    /// Pressed zone length [steps].
    width: i64,
    /// Step edges received.
    pulses: u64,
    /// Last settled switch state.
    settled_pressed: bool,
    /// Remaining chatter samples after a state change.
    bounce_left: u32,
}

impl SimAxis {
    fn pressed_at_position(&self) -> bool {
        self.position >= self.engage_at && self.position < self.engage_at + self.width
    }

    /// Switch level for one sample, including contact chatter.
    fn sample(&mut self, bounce_samples: u32) -> bool {
        let pressed = self.pressed_at_position();
        if pressed != self.settled_pressed {
            self.settled_pressed = pressed;
            self.bounce_left = bounce_samples;
        }
        if self.bounce_left > 0 {
            self.bounce_left -= 1;
            // Alternate around the new level, ending on it.
            if self.bounce_left % 2 == 1 {
                return !pressed;
            }
        }
        pressed
    }
}

/// Machine simulation implementing `StepPort`.
///
/// Wiring matches the configured invert masks: inverted step lines idle
/// high, inverted direction lines read "toward the switch" when low and
/// inverted limit inputs read 1 when pressed (active-low otherwise).
#[derive(Debug)]
pub struct SimulatedMachine {
    pins: PinMap,
    step_invert: u8,
    direction_invert: u8,
    limit_invert: u8,
    bounce_samples: u32,
    outputs: u8,
    pullups: u8,
    reads: u64,
    axes: [SimAxis; N_AXES],
}

impl SimulatedMachine {
    /// Create a machine with every carriage at position 0.
    pub fn new(pins: PinMap, settings: &HomingSettings, config: &SimulationConfig) -> Self {
        let step_invert = settings.invert_mask_stepdir & pins.step_mask();
        let direction_invert = settings.invert_mask_stepdir & pins.direction_mask();
        let limit_invert = settings.invert_mask_limit & pins.limit_mask();

        let mut axes = [SimAxis::default(); N_AXES];
        for axis in Axis::ALL {
            axes[axis.index()] = SimAxis {
                engage_at: i64::from(config.switch_distance_steps[axis.index()]),
                width: i64::from(config.switch_width_steps),
                ..Default::default()
            };
        }

        let mut machine = Self {
            pins,
            step_invert,
            direction_invert,
            limit_invert,
            bounce_samples: config.bounce_samples,
            outputs: step_invert | direction_invert,
            pullups: 0,
            reads: 0,
            axes,
        };
        for axis in Axis::ALL {
            let sim = &mut machine.axes[axis.index()];
            sim.settled_pressed = sim.pressed_at_position();
        }

        debug!(
            "SimulatedMachine initialized: switches at {:?} steps, width {}, bounce {}",
            config.switch_distance_steps, config.switch_width_steps, config.bounce_samples
        );
        machine
    }

    /// Carriage position of one axis [steps].
    pub fn position(&self, axis: Axis) -> i64 {
        self.axes[axis.index()].position
    }

    /// Step edges received by one axis.
    pub fn pulses(&self, axis: Axis) -> u64 {
        self.axes[axis.index()].pulses
    }

    /// Whether the switch of one axis is physically pressed (no chatter).
    pub fn switch_pressed(&self, axis: Axis) -> bool {
        self.axes[axis.index()].pressed_at_position()
    }

    /// Current output latch.
    pub fn outputs(&self) -> u8 {
        self.outputs
    }

    /// Limit pins configured with pull-ups.
    pub fn pullups(&self) -> u8 {
        self.pullups
    }

    /// Number of limit snapshots taken.
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Whether the logical direction line of `axis` points at its switch.
    fn toward_switch(&self, axis: Axis) -> bool {
        (self.outputs ^ self.direction_invert) & self.pins.direction_bit(axis) != 0
    }

    /// Advance every axis that saw an idle -> active step edge.
    fn step_edges(&mut self, before: u8) {
        let after = self.outputs ^ self.step_invert;
        for axis in Axis::ALL {
            let bit = self.pins.step_bit(axis);
            if before & bit == 0 && after & bit != 0 {
                let delta = if self.toward_switch(axis) { 1 } else { -1 };
                let sim = &mut self.axes[axis.index()];
                sim.position += delta;
                sim.pulses += 1;
                trace!(%axis, position = sim.position, "sim step");
            }
        }
    }
}

impl StepPort for SimulatedMachine {
    fn read_limit_inputs(&mut self) -> u8 {
        self.reads += 1;
        let mut raw = !self.pins.limit_mask();
        for axis in Axis::ALL {
            if !self.axes[axis.index()].sample(self.bounce_samples) {
                raw |= self.pins.limit_bit(axis);
            }
        }
        raw ^ self.limit_invert
    }

    fn write_direction_bits(&mut self, bits: u8) {
        let mask = self.pins.direction_mask();
        self.outputs = (self.outputs & !mask) | (bits & mask);
    }

    fn write_step_bits(&mut self, bits: u8) {
        let mask = self.pins.step_mask();
        let before = self.outputs ^ self.step_invert;
        self.outputs = (self.outputs & !mask) | (bits & mask);
        self.step_edges(before);
    }

    fn toggle_step_bits(&mut self, bits: u8) {
        let before = self.outputs ^ self.step_invert;
        self.outputs ^= bits;
        self.step_edges(before);
    }

    fn configure_limit_inputs(&mut self, mask: u8, pullup: bool) {
        if pullup {
            self.pullups |= mask;
        } else {
            self.pullups &= !mask;
        }
        debug!("Limit inputs {:#010b} configured (pullup: {})", mask, pullup);
    }
}
