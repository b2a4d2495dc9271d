//! Homing sequencer: the full go-home procedure.
//!
//! ## Procedure
//!
//! 1. Validate the pin layout, settings and homing options and convert the
//!    seek and feed rates to pulse periods (fail before any collaborator is
//!    touched).
//! 2. Drain the motion planner.
//! 3. Power the stepper drivers.
//! 4. Approach Z alone at the seek rate.
//! 5. Approach X, Y and C together at the seek rate.
//! 6. Leave every homed switch at the feed rate.
//! 7. Zero the machine position of every homed axis.
//!
//! Z goes first so the tool clears fixtures before X and Y move. Phases
//! with no axes are skipped without port I/O.

use crate::engine::{CycleReport, HomingCycleEngine};
use crate::error::HomingError;
use crate::feedrate::FeedRateConverter;
use crate::limits::init_limits;
use homing_common::axis::AxisSet;
use homing_common::config::HomingFileConfig;
use homing_common::hal::pins::PinMap;
use homing_common::hal::port::{Delay, MotionPlanner, StepPort, StepperDriver};
use homing_common::homing::{HomingAxes, HomingConfig};
use homing_common::position::MachinePosition;
use homing_common::settings::HomingSettings;
use std::fmt;
use tracing::{debug, error, info};

/// Phase of the homing procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomingPhase {
    /// Z toward its switch at the seek rate.
    ApproachZ,
    /// X, Y and C toward their switches at the seek rate.
    ApproachXyc,
    /// Every homed axis off its switch at the feed rate.
    Leave,
}

impl HomingPhase {
    /// Phases in execution order.
    pub const ALL: [HomingPhase; 3] = [Self::ApproachZ, Self::ApproachXyc, Self::Leave];

    /// Whether the phase moves away from the switches.
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::Leave)
    }

    /// Axes the phase drives for a given selection.
    pub fn axes(self, selection: &HomingAxes) -> AxisSet {
        match self {
            Self::ApproachZ => selection.approach_z(),
            Self::ApproachXyc => selection.approach_xyc(),
            Self::Leave => selection.requested(),
        }
    }
}

impl fmt::Display for HomingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ApproachZ => "approach Z",
            Self::ApproachXyc => "approach XYC",
            Self::Leave => "leave",
        };
        f.write_str(name)
    }
}

/// One executed phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: HomingPhase,
    pub cycle: CycleReport,
}

/// Outcome of a completed `go_home`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomingReport {
    /// Axes whose machine position was zeroed.
    pub homed: AxisSet,
    /// Executed phases in order (empty phases omitted).
    pub phases: heapless::Vec<PhaseReport, 3>,
    /// Approach pulse period [µs].
    pub seek_period_us: u32,
    /// Leave pulse period [µs].
    pub feed_period_us: u32,
}

impl HomingReport {
    /// Report of `phase`, if it ran.
    pub fn phase(&self, phase: HomingPhase) -> Option<&CycleReport> {
        self.phases
            .iter()
            .find(|p| p.phase == phase)
            .map(|p| &p.cycle)
    }

    /// Step pulses over all phases.
    pub fn total_pulses(&self) -> u64 {
        self.phases.iter().map(|p| p.cycle.pulses).sum()
    }

    /// Requested delay over all phases [µs].
    pub fn total_elapsed_us(&self) -> u64 {
        self.phases.iter().map(|p| p.cycle.elapsed_us).sum()
    }
}

/// Owns the port and delay and runs the homing procedure on them.
pub struct HomingSequencer<P: StepPort, D: Delay> {
    port: P,
    delay: D,
    settings: HomingSettings,
    pins: PinMap,
    config: HomingConfig,
}

impl<P: StepPort, D: Delay> HomingSequencer<P, D> {
    /// Create a sequencer owning `port` and `delay`.
    pub fn new(
        port: P,
        delay: D,
        settings: HomingSettings,
        pins: PinMap,
        config: HomingConfig,
    ) -> Self {
        Self {
            port,
            delay,
            settings,
            pins,
            config,
        }
    }

    /// Build from a loaded configuration file.
    pub fn from_config(port: P, delay: D, config: &HomingFileConfig) -> Self {
        Self::new(
            port,
            delay,
            config.settings.clone(),
            config.pins.clone(),
            config.homing.clone(),
        )
    }

    /// Replace the axis selection used by the next `go_home`.
    pub fn set_axes(&mut self, axes: HomingAxes) {
        self.config.axes = axes;
    }

    /// Axis selection used by the next `go_home`.
    pub fn axes(&self) -> HomingAxes {
        self.config.axes
    }

    /// Owned port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Owned delay.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give back the port and delay.
    pub fn into_parts(self) -> (P, D) {
        (self.port, self.delay)
    }

    /// Configure the limit inputs of the owned port.
    pub fn init_limits(&mut self) {
        init_limits(&mut self.port, &self.settings, &self.pins);
    }

    /// Run the full homing procedure for the configured axes.
    ///
    /// Blocks until every phase completes. On success the machine position
    /// of every homed axis is zero; other axes keep their position.
    ///
    /// # Errors
    ///
    /// - `HomingError::Config` if the pin layout, settings or homing options
    ///   are invalid or a rate yields an unusable pulse period; nothing has
    ///   moved and no collaborator was called.
    /// - `HomingError::SwitchNotFound` if `max_pulses_per_phase` ran out;
    ///   the machine position is left untouched.
    pub fn go_home<M, S>(
        &mut self,
        planner: &mut M,
        steppers: &mut S,
        position: &mut MachinePosition,
    ) -> Result<HomingReport, HomingError>
    where
        M: MotionPlanner,
        S: StepperDriver,
    {
        self.pins.validate()?;
        self.settings.validate()?;
        self.config.validate()?;

        let converter = FeedRateConverter::new(&self.settings);
        let seek_period_us = converter.seek_period_us()?;
        let feed_period_us = converter.feed_period_us()?;

        let selection = self.config.axes;
        let homed = selection.requested();
        info!(
            "Homing axes {} (seek {} µs, feed {} µs)",
            homed, seek_period_us, feed_period_us
        );

        planner.synchronize();
        steppers.enable();

        let mut report = HomingReport {
            homed,
            phases: heapless::Vec::new(),
            seek_period_us,
            feed_period_us,
        };

        let mut engine =
            HomingCycleEngine::new(&mut self.port, &mut self.delay, &self.settings, &self.pins)
                .with_max_pulses(self.config.max_pulses_per_phase);

        for phase in HomingPhase::ALL {
            let axes = phase.axes(&selection);
            if axes.is_empty() {
                debug!("Skipping {} phase, no axes", phase);
                continue;
            }
            let period_us = if phase.is_reverse() {
                feed_period_us
            } else {
                seek_period_us
            };

            info!("Homing phase {} started: axes {}", phase, axes);
            let cycle = engine
                .run(axes, phase.is_reverse(), period_us)
                .inspect_err(|e| error!("Homing phase {} failed: {}", phase, e))?;
            info!(
                "Homing phase {} done: {} pulses, {} µs",
                phase, cycle.pulses, cycle.elapsed_us
            );
            // Capacity equals the phase count.
            let _ = report.phases.push(PhaseReport { phase, cycle });
        }

        position.zero(homed);
        info!("Machine position zeroed for axes {}", homed);
        Ok(report)
    }
}
