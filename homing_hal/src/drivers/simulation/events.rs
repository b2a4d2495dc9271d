//! Event log shared by simulated ports and collaborators.
//!
//! Everything in a simulation runs on one thread, so the log is a plain
//! `Rc<RefCell<_>>` handle that each component clones.

use homing_common::hal::port::{MotionPlanner, StepperDriver};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

/// Observable interaction with the simulated hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortEvent {
    /// Motion planner drained its queue.
    Synchronize,
    /// Stepper drivers powered.
    Enable,
    /// Limit inputs configured.
    ConfigureLimits {
        /// Limit pins configured as inputs.
        mask: u8,
        /// Pull-ups enabled.
        pullup: bool,
    },
    /// Limit snapshot read (raw value returned).
    ReadLimits(u8),
    /// Direction sub-mask written.
    WriteDirection(u8),
    /// Step sub-mask written.
    WriteStep(u8),
    /// Step bits toggled.
    ToggleStep(u8),
}

/// Shared, cloneable event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<PortEvent>>>);

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn record(&self, event: PortEvent) {
        trace!(?event, "sim event");
        self.0.borrow_mut().push(event);
    }

    /// Copy of all events recorded so far.
    pub fn snapshot(&self) -> Vec<PortEvent> {
        self.0.borrow().clone()
    }

    /// Number of events recorded so far.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Forget all recorded events.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Simulated motion planner holding a number of queued moves.
#[derive(Debug, Default)]
pub struct SimPlanner {
    queued_moves: u32,
    sync_calls: u32,
    log: Option<EventLog>,
}

impl SimPlanner {
    /// Planner with `queued_moves` moves still to execute.
    pub fn new(queued_moves: u32) -> Self {
        Self {
            queued_moves,
            ..Default::default()
        }
    }

    /// Record calls into `log`.
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Moves still queued.
    pub fn queued_moves(&self) -> u32 {
        self.queued_moves
    }

    /// Number of `synchronize` calls.
    pub fn sync_calls(&self) -> u32 {
        self.sync_calls
    }
}

impl MotionPlanner for SimPlanner {
    fn synchronize(&mut self) {
        self.queued_moves = 0;
        self.sync_calls += 1;
        if let Some(log) = &self.log {
            log.record(PortEvent::Synchronize);
        }
    }
}

/// Simulated stepper driver power stage.
#[derive(Debug, Default)]
pub struct SimSteppers {
    enabled: bool,
    log: Option<EventLog>,
}

impl SimSteppers {
    /// Drivers start disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record calls into `log`.
    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Whether the drivers are powered.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl StepperDriver for SimSteppers {
    fn enable(&mut self) {
        self.enabled = true;
        if let Some(log) = &self.log {
            log.record(PortEvent::Enable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborators_share_one_log() {
        let log = EventLog::new();
        let mut planner = SimPlanner::new(5).with_log(log.clone());
        let mut steppers = SimSteppers::new().with_log(log.clone());

        planner.synchronize();
        steppers.enable();

        assert_eq!(planner.queued_moves(), 0);
        assert_eq!(planner.sync_calls(), 1);
        assert!(steppers.is_enabled());
        assert_eq!(log.snapshot(), vec![PortEvent::Synchronize, PortEvent::Enable]);
        assert_eq!(log.len(), 2);

        log.clear();
        assert!(log.is_empty());
    }
}
