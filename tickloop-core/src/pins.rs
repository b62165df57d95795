//! Pin sampling and driving
//!
//! Bridges GPIO to the signal world: [`PinSampler`] copies an input level
//! into a flag every pass so edge detectors can watch physical buttons,
//! and [`PinDriver`] mirrors a flag onto an output pin.

use tickloop_hal::{InputPin, OutputPin};

use crate::scheduler::Poll;
use crate::signal::Flag;

/// Copies an input pin level into a flag each poll
pub struct PinSampler<'a, P: InputPin> {
    pin: P,
    signal: &'a Flag,
    invert: bool,
}

impl<'a, P: InputPin> PinSampler<'a, P> {
    pub fn new(pin: P, signal: &'a Flag) -> Self {
        Self {
            pin,
            signal,
            invert: false,
        }
    }

    /// Report pressed while the pin reads low (buttons to ground)
    pub fn active_low(mut self) -> Self {
        self.invert = true;
        self
    }
}

impl<P: InputPin> Poll for PinSampler<'_, P> {
    fn poll(&mut self) {
        self.signal.set(self.pin.is_high() != self.invert);
    }
}

/// Drives an output pin from a flag, writing only when the level changes
pub struct PinDriver<'a, P: OutputPin> {
    pin: P,
    signal: &'a Flag,
    last: Option<bool>,
}

impl<'a, P: OutputPin> PinDriver<'a, P> {
    pub fn new(pin: P, signal: &'a Flag) -> Self {
        Self {
            pin,
            signal,
            last: None,
        }
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> Poll for PinDriver<'_, P> {
    fn poll(&mut self) {
        let level = self.signal.get();
        if self.last != Some(level) {
            self.pin.set_state(level);
            self.last = Some(level);
        }
    }
}
