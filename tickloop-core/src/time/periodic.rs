//! Fixed-rate handler task

use tickloop_hal::{Ticks, TickSource};

use super::timer::Timer;
use crate::scheduler::Poll;
use crate::signal::Flag;

/// Runs a handler every `period` ticks
///
/// The timer is re-armed before the handler runs, so a slow handler does
/// not stretch the period. Missed periods are not caught up.
pub struct Periodic<'a, T: TickSource + ?Sized, H: FnMut()> {
    timer: Timer<'a, T>,
    period: Ticks,
    enable: Option<&'a Flag>,
    handler: H,
}

impl<'a, T: TickSource + ?Sized, H: FnMut()> Periodic<'a, T, H> {
    pub fn new(ticks: &'a T, period: Ticks, handler: H) -> Self {
        Self {
            timer: Timer::new(ticks, period),
            period,
            enable: None,
            handler,
        }
    }

    /// Only run while `enable` is set
    pub fn with_enable(mut self, enable: &'a Flag) -> Self {
        self.enable = Some(enable);
        self
    }

    pub fn period(&self) -> Ticks {
        self.period
    }
}

impl<T: TickSource + ?Sized, H: FnMut()> Poll for Periodic<'_, T, H> {
    fn poll(&mut self) {
        let enabled = self.enable.map_or(true, |flag| flag.get());
        if enabled && self.timer.expired() {
            self.timer.reset(self.period);
            (self.handler)();
        }
    }
}
