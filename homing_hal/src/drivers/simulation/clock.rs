//! Virtual clock.

use homing_common::hal::port::Delay;

/// Delay that returns immediately and accumulates the requested time.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    elapsed_us: u64,
    calls: u64,
}

impl VirtualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all requested delays [µs].
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    /// Number of `delay_us` calls.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl Delay for VirtualClock {
    fn delay_us(&mut self, us: u32) {
        self.elapsed_us += u64::from(us);
        self.calls += 1;
    }
}
