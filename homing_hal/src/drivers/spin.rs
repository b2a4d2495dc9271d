//! Busy-wait delay.
//!
//! Homing timing is produced by spinning on the calling thread, never by
//! yielding to the scheduler: a sleeping thread may wake several hundred
//! microseconds late, which is longer than a whole step period.

use homing_common::hal::port::Delay;
use std::time::{Duration, Instant};

/// Delay that spins on `Instant::now()` until the deadline passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinDelay;

impl SpinDelay {
    /// Create a new busy-wait delay.
    pub const fn new() -> Self {
        Self
    }
}

impl Delay for SpinDelay {
    fn delay_us(&mut self, us: u32) {
        if us == 0 {
            return;
        }
        let deadline = Instant::now() + Duration::from_micros(u64::from(us));
        while Instant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}
