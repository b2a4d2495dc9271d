//! Homing cycle engine: the busy-wait multi-axis pulse loop.
//!
//! Drives every requested axis with one shared step period until each axis
//! has debounced its limit switch. Axes stop independently: an axis whose
//! switch engages early loses its step bit while the others keep pulsing.
//!
//! ## Loop
//!
//! 1. Read the limit byte; flip every limit bit when reversing, then apply
//!    the limit invert mask.
//! 2. Feed each active axis' bit to its debouncer; retire triggered axes by
//!    XORing their step bit out of the output pattern.
//! 3. Return once no axis is active.
//! 4. Emit one pulse: write the step bits, hold the pulse width, toggle the
//!    active step bits back, hold the rest of the period.
//!
//! Toggling instead of clearing ends the pulse on inverted step lines too.

use crate::debounce::Debouncer;
use crate::direction::DirectionResolver;
use crate::error::HomingError;
use homing_common::axis::{Axis, AxisSet};
use homing_common::consts::N_AXES;
use homing_common::hal::pins::PinMap;
use homing_common::hal::port::{Delay, StepPort};
use homing_common::settings::HomingSettings;
use tracing::{debug, trace, warn};

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Axes requested for the run.
    pub axes: AxisSet,
    /// Whether the run moved away from the switches.
    pub reverse: bool,
    /// Step period [µs].
    pub period_us: u32,
    /// Limit snapshots taken.
    pub iterations: u64,
    /// Step pulses emitted (any axis).
    pub pulses: u64,
    /// Step pulses emitted per axis.
    pub axis_pulses: [u64; N_AXES],
    /// Axes in the order their switches debounced.
    pub retired: heapless::Vec<Axis, N_AXES>,
    /// Total requested delay [µs].
    pub elapsed_us: u64,
}

impl CycleReport {
    fn new(axes: AxisSet, reverse: bool, period_us: u32) -> Self {
        Self {
            axes,
            reverse,
            period_us,
            iterations: 0,
            pulses: 0,
            axis_pulses: [0; N_AXES],
            retired: heapless::Vec::new(),
            elapsed_us: 0,
        }
    }

    /// Step pulses emitted to one axis.
    #[inline]
    pub fn pulses_for(&self, axis: Axis) -> u64 {
        self.axis_pulses[axis.index()]
    }
}

/// Multi-axis constant-rate pulse generator with per-axis stop conditions.
///
/// Borrows the port and delay exclusively for its lifetime; nothing else
/// may drive the outputs while a run is in progress.
pub struct HomingCycleEngine<'a, P: StepPort, D: Delay> {
    port: &'a mut P,
    delay: &'a mut D,
    settings: &'a HomingSettings,
    pins: &'a PinMap,
    max_pulses: Option<u64>,
}

impl<'a, P: StepPort, D: Delay> HomingCycleEngine<'a, P, D> {
    /// Create an unbounded engine.
    pub fn new(
        port: &'a mut P,
        delay: &'a mut D,
        settings: &'a HomingSettings,
        pins: &'a PinMap,
    ) -> Self {
        Self {
            port,
            delay,
            settings,
            pins,
            max_pulses: None,
        }
    }

    /// Abort a run after `max_pulses` pulses (`None`: never).
    pub fn with_max_pulses(mut self, max_pulses: Option<u64>) -> Self {
        self.max_pulses = max_pulses;
        self
    }

    /// Drive `axes` until every one of them has debounced its switch.
    ///
    /// `reverse` moves away from the switches and waits for them to release.
    ///
    /// # Blocking
    ///
    /// Without a pulse budget this only returns once every axis triggered;
    /// a disconnected switch blocks forever.
    ///
    /// # Errors
    ///
    /// Returns `HomingError::SwitchNotFound` when a pulse budget is set and
    /// exhausted with axes still active.
    pub fn run(
        &mut self,
        axes: AxisSet,
        reverse: bool,
        period_us: u32,
    ) -> Result<CycleReport, HomingError> {
        let mut report = CycleReport::new(axes, reverse, period_us);
        if axes.is_empty() {
            return Ok(report);
        }

        let pulse_us = self.settings.pulse_microseconds;
        let rest_us = if period_us < pulse_us {
            warn!(
                "Step period {} µs shorter than pulse width {} µs, rest clamped to 0",
                period_us, pulse_us
            );
            0
        } else {
            period_us - pulse_us
        };

        let step_mask = self.pins.step_mask();
        let limit_mask = self.pins.limit_mask();
        let invert_limit = self.settings.invert_mask_limit;

        let mut out_bits =
            DirectionResolver::new(self.pins, self.settings.invert_mask_stepdir).resolve(axes, reverse);

        // Direction must settle before the first pulse.
        self.port
            .write_direction_bits(out_bits.masked(self.pins.direction_mask()));

        debug!(
            "Homing run: axes {}, reverse {}, period {} µs, output {}",
            axes, reverse, period_us, out_bits
        );

        let mut debouncers = [Debouncer::new(); N_AXES];
        let mut active = axes;

        loop {
            let mut limit_bits = self.port.read_limit_inputs();
            if reverse {
                limit_bits ^= limit_mask;
            }
            limit_bits ^= invert_limit;
            report.iterations += 1;
            trace!(limit_bits, %active, "limit snapshot");

            for axis in active.axes() {
                let debouncer = &mut debouncers[axis.index()];
                debouncer.observe(limit_bits & self.pins.limit_bit(axis) != 0);
                if debouncer.is_triggered() {
                    active.remove(axis.as_set());
                    out_bits.toggle(self.pins.step_bit(axis));
                    // Capacity equals the axis count.
                    let _ = report.retired.push(axis);
                    debug!(
                        "Axis {} switch {} after {} pulses",
                        axis,
                        if reverse { "released" } else { "engaged" },
                        report.pulses_for(axis)
                    );
                }
            }

            if active.is_empty() {
                return Ok(report);
            }

            if self.max_pulses.is_some_and(|max| report.pulses >= max) {
                warn!(
                    "Pulse budget exhausted after {} pulses, axes {} still active",
                    report.pulses, active
                );
                return Err(HomingError::SwitchNotFound {
                    axes: active,
                    pulses: report.pulses,
                });
            }

            self.port.write_step_bits(out_bits.masked(step_mask));
            self.delay.delay_us(pulse_us);
            self.port.toggle_step_bits(self.pins.step_mask_for(active));
            self.delay.delay_us(rest_us);

            report.pulses += 1;
            for axis in active.axes() {
                report.axis_pulses[axis.index()] += 1;
            }
            report.elapsed_us += u64::from(pulse_us) + u64::from(rest_us);
        }
    }
}
