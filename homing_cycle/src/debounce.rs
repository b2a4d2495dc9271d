//! Limit switch debouncing.
//!
//! A switch counts as engaged only after `DEBOUNCE_SAMPLES` consecutive
//! engaged samples; any single disengaged sample restarts the count.

use homing_common::consts::DEBOUNCE_SAMPLES;

/// Consecutive-sample counter for one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    count: u8,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Feed one normalized limit bit. Low (`false`) means engaged.
    #[inline]
    pub fn observe(&mut self, normalized_bit: bool) {
        if normalized_bit {
            self.count = 0;
        } else {
            self.count = self.count.saturating_add(1);
        }
    }

    /// Whether enough consecutive engaged samples were seen.
    #[inline]
    pub const fn is_triggered(&self) -> bool {
        self.count >= DEBOUNCE_SAMPLES
    }

    /// Current run of consecutive engaged samples.
    #[inline]
    pub const fn count(&self) -> u8 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}
