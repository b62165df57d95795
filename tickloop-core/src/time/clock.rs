//! Square-wave clock

use tickloop_hal::{Ticks, TickSource};

use super::timer::Timer;
use crate::scheduler::Poll;
use crate::signal::{Flag, Signal};

/// Square wave generator
///
/// Drives `output` high for `high_time` ticks and low for `low_time`
/// ticks, forever. Both times are read from signals at every edge, so they
/// can be retuned (for example from a menu) while the clock runs.
///
/// An optional enable flag is checked every poll. Disabling forces the
/// output low; re-enabling starts a fresh cycle on the next tick.
///
/// Register the clock before any task that observes `output` so that they
/// see the edge in the same pass.
pub struct Clock<'a, T: TickSource + ?Sized> {
    timer: Timer<'a, T>,
    low_time: &'a Signal<Ticks>,
    high_time: &'a Signal<Ticks>,
    output: &'a Flag,
    enable: Option<&'a Flag>,
    was_enabled: bool,
}

impl<'a, T: TickSource + ?Sized> Clock<'a, T> {
    /// Create a clock whose first rising edge comes after `low_time`
    pub fn new(
        ticks: &'a T,
        low_time: &'a Signal<Ticks>,
        high_time: &'a Signal<Ticks>,
        output: &'a Flag,
    ) -> Self {
        Self {
            timer: Timer::new(ticks, low_time.get()),
            low_time,
            high_time,
            output,
            enable: None,
            was_enabled: true,
        }
    }

    /// Gate the clock on a shared enable flag
    pub fn with_enable(mut self, enable: &'a Flag) -> Self {
        self.was_enabled = enable.get();
        if !self.was_enabled {
            self.output.set(false);
        }
        self.enable = Some(enable);
        self
    }

    pub fn enabled(&self) -> bool {
        self.enable.map_or(true, |flag| flag.get())
    }
}

impl<T: TickSource + ?Sized> Poll for Clock<'_, T> {
    fn poll(&mut self) {
        let enabled = self.enabled();
        if enabled != self.was_enabled {
            self.was_enabled = enabled;
            self.output.set(false);
            self.timer.reset(0);
        }

        if !enabled || !self.timer.expired() {
            return;
        }

        if self.output.get() {
            self.output.set(false);
            self.timer.reset(self.low_time.get());
        } else {
            self.output.set(true);
            self.timer.reset(self.high_time.get());
        }
    }
}
