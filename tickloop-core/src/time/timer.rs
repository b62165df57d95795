//! Elapsed-time timer

use tickloop_hal::{elapsed, Ticks, TickSource};

/// Duration that never expires
///
/// Arming a timer with `NEVER` disables it without a separate flag.
pub const NEVER: Ticks = Ticks::MAX;

/// One-shot elapsed-time check
///
/// `expired()` becomes true once strictly more than `duration` ticks have
/// passed since the last reset, and stays true until the timer is re-armed.
/// Elapsed time is computed with wrapping arithmetic, so a single wrap of
/// the tick counter between reset and query is harmless.
#[derive(Debug)]
pub struct Timer<'a, T: TickSource + ?Sized> {
    ticks: &'a T,
    duration: Ticks,
    last_reset: Ticks,
}

impl<'a, T: TickSource + ?Sized> Timer<'a, T> {
    /// Create a timer armed at the current tick
    pub fn new(ticks: &'a T, duration: Ticks) -> Self {
        Self {
            ticks,
            duration,
            last_reset: ticks.now(),
        }
    }

    /// Create a disabled timer
    pub fn disabled(ticks: &'a T) -> Self {
        Self::new(ticks, NEVER)
    }

    /// Re-arm with a new duration, starting now
    pub fn reset(&mut self, duration: Ticks) {
        self.duration = duration;
        self.last_reset = self.ticks.now();
    }

    /// Re-arm with the current duration, starting now
    pub fn rearm(&mut self) {
        self.reset(self.duration);
    }

    /// Disable until the next `reset`
    pub fn disable(&mut self) {
        self.reset(NEVER);
    }

    pub fn expired(&self) -> bool {
        self.elapsed() > self.duration
    }

    /// Ticks since the last reset
    pub fn elapsed(&self) -> Ticks {
        elapsed(self.ticks.now(), self.last_reset)
    }

    /// Ticks left until expiry (zero once expired)
    pub fn remaining(&self) -> Ticks {
        self.duration.saturating_sub(self.elapsed())
    }

    pub fn duration(&self) -> Ticks {
        self.duration
    }

    pub fn is_disabled(&self) -> bool {
        self.duration == NEVER
    }
}
